//! Dihedral symmetries of the board
//!
//! Knight moves, the corner penalty and all evaluation formulas are invariant
//! under the symmetries of the rectangle, so two positions related by one of
//! them have the same search value. A square board has all eight dihedral
//! transforms; a non-square board only keeps the four that preserve its shape.

use crate::board::Pos;

/// A geometric transform of a `width x height` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    /// Mirror left-right
    FlipHorizontal,
    /// Mirror top-bottom
    FlipVertical,
    Rotate180,
    /// Mirror across the main diagonal (square boards only)
    Transpose,
    /// Mirror across the anti-diagonal (square boards only)
    AntiTranspose,
    /// Quarter turn clockwise (square boards only)
    Rotate90,
    /// Quarter turn counter-clockwise (square boards only)
    Rotate270,
}

const RECTANGLE: [Symmetry; 4] = [
    Symmetry::Identity,
    Symmetry::FlipHorizontal,
    Symmetry::FlipVertical,
    Symmetry::Rotate180,
];

const SQUARE: [Symmetry; 8] = [
    Symmetry::Identity,
    Symmetry::FlipHorizontal,
    Symmetry::FlipVertical,
    Symmetry::Rotate180,
    Symmetry::Transpose,
    Symmetry::AntiTranspose,
    Symmetry::Rotate90,
    Symmetry::Rotate270,
];

impl Symmetry {
    /// Transforms that map a `width x height` board onto itself
    #[must_use]
    pub fn for_board(width: usize, height: usize) -> &'static [Symmetry] {
        if width == height {
            &SQUARE
        } else {
            &RECTANGLE
        }
    }

    /// Transform undoing `self`
    #[must_use]
    pub fn inverse(self) -> Symmetry {
        match self {
            Symmetry::Rotate90 => Symmetry::Rotate270,
            Symmetry::Rotate270 => Symmetry::Rotate90,
            other => other,
        }
    }

    /// Map `pos` on a `width x height` board.
    ///
    /// The transposing variants assume a square board.
    #[must_use]
    pub fn apply(self, pos: Pos, width: usize, height: usize) -> Pos {
        let (r, c) = (pos.row as usize, pos.col as usize);
        let (last_r, last_c) = (height - 1, width - 1);
        let (row, col) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::FlipHorizontal => (r, last_c - c),
            Symmetry::FlipVertical => (last_r - r, c),
            Symmetry::Rotate180 => (last_r - r, last_c - c),
            Symmetry::Transpose => (c, r),
            Symmetry::AntiTranspose => (last_c - c, last_r - r),
            Symmetry::Rotate90 => (c, last_r - r),
            Symmetry::Rotate270 => (last_c - c, r),
        };
        Pos::new(row as u8, col as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sizes() {
        assert_eq!(Symmetry::for_board(7, 7).len(), 8);
        assert_eq!(Symmetry::for_board(5, 3).len(), 4);
    }

    #[test]
    fn test_inverse_round_trip_square() {
        for &sym in Symmetry::for_board(5, 5) {
            for row in 0..5 {
                for col in 0..5 {
                    let pos = Pos::new(row, col);
                    let there = sym.apply(pos, 5, 5);
                    assert_eq!(sym.inverse().apply(there, 5, 5), pos, "{sym:?} {pos}");
                }
            }
        }
    }

    #[test]
    fn test_inverse_round_trip_rectangle() {
        for &sym in Symmetry::for_board(4, 2) {
            for row in 0..2 {
                for col in 0..4 {
                    let pos = Pos::new(row, col);
                    let there = sym.apply(pos, 4, 2);
                    assert!(there.row < 2 && there.col < 4);
                    assert_eq!(sym.inverse().apply(there, 4, 2), pos);
                }
            }
        }
    }

    #[test]
    fn test_transforms_are_distinct_on_square() {
        // A generic cell has eight distinct images
        let pos = Pos::new(0, 1);
        let mut images: Vec<Pos> = Symmetry::for_board(4, 4)
            .iter()
            .map(|s| s.apply(pos, 4, 4))
            .collect();
        images.sort();
        images.dedup();
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn test_rotate90_clockwise() {
        // Top-left corner goes to top-right under a clockwise quarter turn
        assert_eq!(Symmetry::Rotate90.apply(Pos::new(0, 0), 3, 3), Pos::new(0, 2));
        assert_eq!(Symmetry::Rotate90.apply(Pos::new(0, 2), 3, 3), Pos::new(2, 2));
    }
}
