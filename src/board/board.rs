//! Isolation board with occupancy tracking

use std::fmt;

use tracing::debug;

use super::bitboard::Bitboard;
use super::{Player, Pos, DEFAULT_SIZE, KNIGHT_DIRECTIONS, MAX_SIZE};
use crate::error::{Error, Result};
use crate::game::Game;

/// Isolation game state.
///
/// Cells a player has stood on are blocked and stay blocked, so every
/// forecast produces a board with strictly more occupancy than its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Blocked (visited) cells, including both players' current cells
    blocked: Bitboard,
    /// Current cell of each player, indexed by [`Player::index`]
    locations: [Option<Pos>; 2],
    active: Player,
}

impl Board {
    /// Create an empty board. Player one moves first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardSize`] if either side is 0 or exceeds 255.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_SIZE || height > MAX_SIZE {
            return Err(Error::InvalidBoardSize { width, height });
        }
        Ok(Self::empty(width, height))
    }

    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: Bitboard::new(width * height),
            locations: [None, None],
            active: Player::One,
        }
    }

    /// Build an arbitrary position.
    ///
    /// `blocked` lists visited cells; player cells are blocked automatically.
    /// No reachability check is made, which makes this handy for setting up
    /// test positions and analysis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardSize`] or [`Error::OutOfBounds`].
    pub fn from_parts(
        width: usize,
        height: usize,
        blocked: &[Pos],
        one: Option<Pos>,
        two: Option<Pos>,
        active: Player,
    ) -> Result<Self> {
        let mut board = Self::new(width, height)?;
        for &pos in blocked.iter().chain(one.iter()).chain(two.iter()) {
            board.check_bounds(pos)?;
            board.blocked.set(pos.to_index(width));
        }
        board.locations = [one, two];
        board.active = active;
        Ok(board)
    }

    /// Copy of this board with extra cells blocked
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if any cell is off the board.
    pub fn with_blocked(&self, cells: &[Pos]) -> Result<Self> {
        let mut board = self.clone();
        for &pos in cells {
            board.check_bounds(pos)?;
            board.blocked.set(pos.to_index(self.width));
        }
        Ok(board)
    }

    fn check_bounds(&self, pos: Pos) -> Result<()> {
        if Pos::is_valid(pos.row as i32, pos.col as i32, self.width, self.height) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Occupancy bitboard (row-major)
    #[inline]
    pub fn blocked(&self) -> &Bitboard {
        &self.blocked
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of `pos` on this board
    #[inline]
    pub fn cell_index(&self, pos: Pos) -> usize {
        pos.to_index(self.width)
    }

    /// Iterate over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.cell_count()).map(move |idx| Pos::from_index(idx, self.width))
    }

    /// Play `mv` for the active player, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] or [`Error::IllegalMove`]; the board is
    /// left unchanged on error.
    pub fn apply_move(&mut self, mv: Pos) -> Result<()> {
        self.check_bounds(mv)?;
        if !self.move_is_legal(mv) {
            return Err(Error::IllegalMove { pos: mv });
        }
        debug!(player = ?self.active, %mv, "apply move");
        self.play(mv);
        Ok(())
    }

    #[inline]
    fn play(&mut self, mv: Pos) {
        self.blocked.set(mv.to_index(self.width));
        self.locations[self.active.index()] = Some(mv);
        self.active = self.active.opponent();
    }
}

impl Game for Board {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn active_player(&self) -> Player {
        self.active
    }

    #[inline]
    fn player_location(&self, player: Player) -> Option<Pos> {
        self.locations[player.index()]
    }

    #[inline]
    fn is_blank(&self, pos: Pos) -> bool {
        !self.blocked.get(pos.to_index(self.width))
    }

    #[inline]
    fn blocked_count(&self) -> usize {
        self.blocked.count() as usize
    }

    fn moves_from(&self, from: Pos) -> Vec<Pos> {
        KNIGHT_DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc, self.width, self.height))
            .filter(|&pos| self.is_blank(pos))
            .collect()
    }

    fn legal_moves(&self, player: Player) -> Vec<Pos> {
        match self.player_location(player) {
            Some(from) => self.moves_from(from),
            None => self.positions().filter(|&pos| self.is_blank(pos)).collect(),
        }
    }

    fn forecast_move(&self, mv: Pos) -> Self {
        debug_assert!(self.is_blank(mv), "forecast onto blocked cell {mv}");
        let mut next = self.clone();
        next.play(mv);
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl fmt::Display for Board {
    /// `1`/`2` for the players, `#` for blocked cells, `.` for empty ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Pos::new(row as u8, col as u8);
                let c = if self.locations[0] == Some(pos) {
                    '1'
                } else if self.locations[1] == Some(pos) {
                    '2'
                } else if self.is_blank(pos) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{c}")?;
                if col + 1 < self.width {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
