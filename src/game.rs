//! The game interface the search core is written against
//!
//! The search, evaluation and cache code never look inside a concrete board.
//! They only use the capabilities below, so any two-player, alternating,
//! perfect-information grid game with a single piece per side can be plugged in.
//! [`crate::Board`] (Isolation with knight moves) is the implementation shipped
//! with the crate.

use crate::board::{Player, Pos};

/// Immutable game state consumed by the search.
///
/// States are values: [`Game::forecast_move`] returns a new state and never
/// mutates `self`, so every search node owns the state it was expanded from.
pub trait Game: Clone {
    /// Board width in cells
    fn width(&self) -> usize;

    /// Board height in cells
    fn height(&self) -> usize;

    /// Player to move
    fn active_player(&self) -> Player;

    /// Player who just moved
    #[inline]
    fn inactive_player(&self) -> Player {
        self.active_player().opponent()
    }

    /// Current cell of `player`, or `None` before their first move
    fn player_location(&self, player: Player) -> Option<Pos>;

    /// Whether `pos` is empty (never visited)
    fn is_blank(&self, pos: Pos) -> bool;

    /// Number of blocked cells
    fn blocked_count(&self) -> usize;

    /// Empty cells reachable in one move from `from`, ignoring whose turn it is
    fn moves_from(&self, from: Pos) -> Vec<Pos>;

    /// Legal moves for `player`, in generation order
    fn legal_moves(&self, player: Player) -> Vec<Pos>;

    /// New state with `mv` played by the active player and the turn passed
    fn forecast_move(&self, mv: Pos) -> Self;

    /// Whether the active player may play `mv`
    fn move_is_legal(&self, mv: Pos) -> bool {
        self.legal_moves(self.active_player()).contains(&mv)
    }

    /// `player` is to move and has no legal move
    fn is_loser(&self, player: Player) -> bool {
        player == self.active_player() && self.legal_moves(player).is_empty()
    }

    /// `player`'s opponent is to move and has no legal move
    fn is_winner(&self, player: Player) -> bool {
        player == self.inactive_player() && self.legal_moves(self.active_player()).is_empty()
    }
}
