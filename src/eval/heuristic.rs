//! Heuristic evaluation functions for Isolation positions
//!
//! Every function scores a state from the point of view of `player`:
//! higher is better for `player`. The corner penalty reflects that knight
//! moves have the fewest exits near the corners of the board.

use serde::{Deserialize, Serialize};

use crate::board::{Player, Pos};
use crate::game::Game;

/// Penalty for standing on one of the four corners
pub const CORNER_PENALTY: f64 = -3.0;

/// Penalty for standing on one of the eight cells next to a corner
pub const NEAR_CORNER_PENALTY: f64 = -2.0;

/// Leaf evaluation strategy used by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// `|own moves| - |opponent moves| + corner penalty`
    Mobility,
    /// Mobility plus the onward move counts of every candidate move
    #[default]
    ExtendedMobility,
    /// Manhattan distance between the players plus corner penalty
    Distance,
    /// Visit count of the best root child after a UCB1 tree search.
    /// Needs a search budget, so it is evaluated by the searcher.
    MonteCarlo,
}

impl Heuristic {
    /// All strategies, in a stable order (for UI selectors)
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Mobility,
        Heuristic::ExtendedMobility,
        Heuristic::Distance,
        Heuristic::MonteCarlo,
    ];

    /// Short human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Mobility => "Mobility",
            Heuristic::ExtendedMobility => "Extended mobility",
            Heuristic::Distance => "Distance",
            Heuristic::MonteCarlo => "Monte Carlo",
        }
    }

    /// Whether the strategy can be computed without a search budget
    #[inline]
    pub fn is_static(self) -> bool {
        !matches!(self, Heuristic::MonteCarlo)
    }
}

/// `Some(-inf)` if `player` has lost, `Some(+inf)` if `player` has won.
///
/// Checked by every strategy before its own formula.
#[inline]
pub fn terminal_score<G: Game>(state: &G, player: Player) -> Option<f64> {
    if state.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else if state.is_winner(player) {
        Some(f64::INFINITY)
    } else {
        None
    }
}

/// Evaluate `state` for `player` with a static strategy.
///
/// Returns `None` for [`Heuristic::MonteCarlo`], which needs a search
/// budget and a random source (see [`crate::search::mcts`]).
///
/// # Example
///
/// ```
/// use isolation::{Board, Game, Player, Pos};
/// use isolation::eval::{evaluate, Heuristic};
///
/// let board = Board::from_parts(7, 7, &[], Some(Pos::new(3, 3)), Some(Pos::new(0, 0)), Player::One)
///     .unwrap();
/// // Centre (8 moves) against a corner (2 moves); the centre carries no penalty
/// assert_eq!(evaluate(&board, Player::One, Heuristic::Mobility), Some(6.0));
/// ```
#[must_use]
pub fn evaluate<G: Game>(state: &G, player: Player, heuristic: Heuristic) -> Option<f64> {
    match heuristic {
        Heuristic::Mobility => Some(mobility_score(state, player)),
        Heuristic::ExtendedMobility => Some(extended_mobility_score(state, player)),
        Heuristic::Distance => Some(distance_score(state, player)),
        Heuristic::MonteCarlo => None,
    }
}

/// Mobility difference plus corner penalty
#[must_use]
pub fn mobility_score<G: Game>(state: &G, player: Player) -> f64 {
    if let Some(score) = terminal_score(state, player) {
        return score;
    }
    let own = state.legal_moves(player).len() as f64;
    let opp = state.legal_moves(player.opponent()).len() as f64;
    own - opp + corner_penalty(state, player)
}

/// Mobility difference plus the one-ply look-ahead mobility of each side.
///
/// For every candidate move of either player, the number of empty cells
/// reachable from that candidate is added (own) or subtracted (opponent).
#[must_use]
pub fn extended_mobility_score<G: Game>(state: &G, player: Player) -> f64 {
    if let Some(score) = terminal_score(state, player) {
        return score;
    }
    let own_moves = state.legal_moves(player);
    let opp_moves = state.legal_moves(player.opponent());

    let own_next: usize = own_moves.iter().map(|&m| move_count(state, m)).sum();
    let opp_next: usize = opp_moves.iter().map(|&m| move_count(state, m)).sum();

    (own_moves.len() + own_next) as f64 - (opp_moves.len() + opp_next) as f64
        + corner_penalty(state, player)
}

/// Manhattan distance between the players plus corner penalty.
///
/// An unplaced player contributes no distance.
#[must_use]
pub fn distance_score<G: Game>(state: &G, player: Player) -> f64 {
    if let Some(score) = terminal_score(state, player) {
        return score;
    }
    let distance = match (
        state.player_location(player),
        state.player_location(player.opponent()),
    ) {
        (Some(own), Some(opp)) => own.manhattan(opp) as f64,
        _ => 0.0,
    };
    distance + corner_penalty(state, player)
}

/// Number of empty cells one move away from `pos`
#[inline]
#[must_use]
pub fn move_count<G: Game>(state: &G, pos: Pos) -> usize {
    state.moves_from(pos).len()
}

/// `-3` on a corner, `-2` next to a corner, `0` elsewhere or when unplaced
#[must_use]
pub fn corner_penalty<G: Game>(state: &G, player: Player) -> f64 {
    let Some(pos) = state.player_location(player) else {
        return 0.0;
    };
    let last_row = state.height().saturating_sub(1);
    let last_col = state.width().saturating_sub(1);
    let (row, col) = (pos.row as usize, pos.col as usize);

    let on_row_edge = row == 0 || row == last_row;
    let on_col_edge = col == 0 || col == last_col;
    if on_row_edge && on_col_edge {
        return CORNER_PENALTY;
    }

    // One step along an edge from a corner
    let near_row_edge = row == 1 || row + 2 == state.height();
    let near_col_edge = col == 1 || col + 2 == state.width();
    if (on_row_edge && near_col_edge) || (on_col_edge && near_row_edge) {
        NEAR_CORNER_PENALTY
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn placed(width: usize, height: usize, one: Pos, two: Pos, blocked: &[Pos]) -> Board {
        Board::from_parts(width, height, blocked, Some(one), Some(two), Player::One).unwrap()
    }

    #[test]
    fn test_corner_penalty_square() {
        let board = |p: Pos| placed(7, 7, p, Pos::new(3, 3), &[]);
        for corner in [Pos::new(0, 0), Pos::new(0, 6), Pos::new(6, 0), Pos::new(6, 6)] {
            assert_eq!(corner_penalty(&board(corner), Player::One), -3.0, "{corner}");
        }
        for near in [
            Pos::new(0, 1),
            Pos::new(1, 0),
            Pos::new(0, 5),
            Pos::new(1, 6),
            Pos::new(5, 0),
            Pos::new(6, 1),
            Pos::new(6, 5),
            Pos::new(5, 6),
        ] {
            assert_eq!(corner_penalty(&board(near), Player::One), -2.0, "{near}");
        }
        for other in [Pos::new(1, 1), Pos::new(0, 3), Pos::new(2, 0), Pos::new(4, 4)] {
            assert_eq!(corner_penalty(&board(other), Player::One), 0.0, "{other}");
        }
    }

    #[test]
    fn test_corner_penalty_rectangular() {
        // 5 wide, 3 tall
        let board = |p: Pos| placed(5, 3, p, Pos::new(1, 2), &[]);
        assert_eq!(corner_penalty(&board(Pos::new(2, 4)), Player::One), -3.0);
        assert_eq!(corner_penalty(&board(Pos::new(2, 3)), Player::One), -2.0);
        assert_eq!(corner_penalty(&board(Pos::new(1, 4)), Player::One), -2.0);
        assert_eq!(corner_penalty(&board(Pos::new(0, 2)), Player::One), 0.0);
    }

    #[test]
    fn test_corner_penalty_unplaced() {
        let board = Board::default();
        assert_eq!(corner_penalty(&board, Player::One), 0.0);
    }

    #[test]
    fn test_mobility_score() {
        let board = placed(7, 7, Pos::new(3, 3), Pos::new(0, 0), &[]);
        assert_eq!(mobility_score(&board, Player::One), 8.0 - 2.0);
        assert_eq!(mobility_score(&board, Player::Two), 2.0 - 8.0 - 3.0);
    }

    #[test]
    fn test_extended_mobility_score() {
        // 3x3: player one at (0,0) reaches (1,2) and (2,1); player two at (2,2)
        // reaches (0,1) and (1,0). Onward from each candidate, one empty cell
        // remains ((1,2)->(2,0), (2,1)->(0,2), (0,1)->(2,0), (1,0)->(0,2)).
        let board = placed(3, 3, Pos::new(0, 0), Pos::new(2, 2), &[]);
        assert_eq!(move_count(&board, Pos::new(1, 2)), 1);
        assert_eq!(extended_mobility_score(&board, Player::One), (2.0 + 2.0) - (2.0 + 2.0) - 3.0);
    }

    #[test]
    fn test_distance_score() {
        let board = placed(7, 7, Pos::new(3, 3), Pos::new(0, 1), &[]);
        assert_eq!(distance_score(&board, Player::One), 5.0);
        assert_eq!(distance_score(&board, Player::Two), 5.0 - 2.0);
    }

    #[test]
    fn test_terminal_scores() {
        // Player two to move at (0,0) with both exits blocked
        let board = Board::from_parts(
            3,
            3,
            &[Pos::new(1, 2), Pos::new(2, 1)],
            Some(Pos::new(2, 2)),
            Some(Pos::new(0, 0)),
            Player::Two,
        )
        .unwrap();
        for h in [Heuristic::Mobility, Heuristic::ExtendedMobility, Heuristic::Distance] {
            assert_eq!(evaluate(&board, Player::One, h), Some(f64::INFINITY));
            assert_eq!(evaluate(&board, Player::Two, h), Some(f64::NEG_INFINITY));
        }
    }

    #[test]
    fn test_monte_carlo_is_not_static() {
        let board = Board::default();
        assert!(!Heuristic::MonteCarlo.is_static());
        assert_eq!(evaluate(&board, Player::One, Heuristic::MonteCarlo), None);
        assert!(Heuristic::ALL.iter().filter(|h| h.is_static()).count() == 3);
    }

    #[test]
    fn test_heuristic_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            h: Heuristic,
        }
        let w: Wrapper = toml::from_str("h = \"extended_mobility\"").unwrap();
        assert_eq!(w.h, Heuristic::ExtendedMobility);
        let w: Wrapper = toml::from_str("h = \"monte_carlo\"").unwrap();
        assert_eq!(w.h, Heuristic::MonteCarlo);
    }
}
