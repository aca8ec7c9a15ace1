//! Board representation for Isolation with knight moves
//!
//! Two players each move a single piece like a chess knight. Every cell a
//! piece has ever stood on is blocked for the rest of the game, so occupancy
//! only grows. A player that is to move and has no legal move loses.
//!
//! Before a player has been placed, any empty cell is a legal first move.

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

pub use board::Board;

/// Default board side length (7x7)
pub const DEFAULT_SIZE: usize = 7;

/// Largest supported side length; positions are stored as `u8`.
pub const MAX_SIZE: usize = 255;

/// Knight jump offsets as `(d_row, d_col)`, in move-generation order.
pub const KNIGHT_DIRECTIONS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The two sides of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Slot index (0 for `One`, 1 for `Two`)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Position on the board.
///
/// A move is an `Option<Pos>`; `None` is the "no legal move" result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major cell index on a board `width` cells wide
    #[inline]
    pub fn to_index(self, width: usize) -> usize {
        self.row as usize * width + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, width: usize) -> Self {
        Self {
            row: (idx / width) as u8,
            col: (idx % width) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, width: usize, height: usize) -> bool {
        row >= 0 && row < height as i32 && col >= 0 && col < width as i32
    }

    /// Position displaced by `(d_row, d_col)`, if it stays on the board
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32, width: usize, height: usize) -> Option<Pos> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;
        if Pos::is_valid(row, col, width, height) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Manhattan distance to another position
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        (self.row as i32 - other.row as i32).unsigned_abs()
            + (self.col as i32 - other.col as i32).unsigned_abs()
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
