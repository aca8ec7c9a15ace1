//! Main AI engine integrating the search components
//!
//! The engine is the entry point a game loop talks to. Given a position and a
//! deadline it always answers with a legal move (or `None` when the side to
//! move has none), whatever happens inside the search:
//!
//! 1. **No legal move**: return `None` immediately
//! 2. **Immediate win**: a move that leaves the opponent stuck
//! 3. **Search**: iterative deepening alpha-beta, or fixed-depth minimax,
//!    depending on [`SearchMode`]
//! 4. **Fallback**: a random legal move if the deadline fired before the
//!    first depth completed
//!
//! # Example
//!
//! ```
//! use isolation::{AIEngine, Board, Game, Pos};
//! use isolation::config::EngineConfig;
//!
//! let mut engine = AIEngine::with_config(EngineConfig::for_testing().with_time_limit_ms(200));
//! let mut board = Board::new(5, 5).unwrap();
//! board.apply_move(Pos::new(2, 2)).unwrap();
//!
//! let result = engine.get_move_with_stats(&board);
//! let mv = result.best_move.unwrap();
//! assert!(board.move_is_legal(mv));
//! println!("{:?} at depth {} in {}ms", result.search_type, result.depth, result.time_ms);
//! ```

use std::time::Instant;

use tracing::{debug, info};

use crate::board::Pos;
use crate::config::{EngineConfig, SearchMode};
use crate::eval::Heuristic;
use crate::game::Game;
use crate::search::{CacheStats, Deadline, SearchResult, Searcher, Timer};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// The side to move had no legal move
    NoMove,
    /// Found a move that leaves the opponent without moves
    ImmediateWin,
    /// Iterative deepening alpha-beta
    AlphaBeta,
    /// Fixed-depth minimax
    Minimax,
    /// Deadline fired before any depth completed; random legal move
    Fallback,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Best move found, `None` only if there is no legal move
    pub best_move: Option<Pos>,
    /// Value of the move for the side to move
    pub score: f64,
    /// Last completed search depth
    pub depth: u32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    /// Transposition cache counters
    pub cache: CacheStats,
}

impl MoveResult {
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: f64::NEG_INFINITY,
            depth: 0,
            search_type: SearchType::NoMove,
            time_ms,
            nodes: 0,
            cache: CacheStats::default(),
        }
    }

    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: f64::INFINITY,
            depth: 1,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 1,
            cache: CacheStats::default(),
        }
    }

    fn from_search(result: SearchResult, search_type: SearchType, time_ms: u64) -> Self {
        let search_type = if result.depth == 0 && result.best_move.is_some() {
            SearchType::Fallback
        } else {
            search_type
        };
        Self {
            best_move: result.best_move,
            score: result.score,
            depth: result.depth,
            search_type,
            time_ms,
            nodes: result.nodes,
            cache: result.stats.cache,
        }
    }
}

/// Main AI engine for Isolation.
///
/// Holds the configuration and a [`Searcher`]. Nothing learned during one
/// decision is carried over to the next.
///
/// # Example
///
/// ```
/// use isolation::{AIEngine, Board};
/// use isolation::config::EngineConfig;
/// use isolation::search::Timer;
///
/// let mut engine = AIEngine::with_config(EngineConfig::for_testing());
/// let board = Board::new(4, 4).unwrap();
/// let deadline = Timer::from_millis(100);
/// assert!(engine.decide_move(&board, &deadline).is_some());
/// ```
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(&config),
            config,
        }
    }

    /// Choose a move for the side to move before `time_left` runs out.
    ///
    /// # Arguments
    ///
    /// * `state` - Current position
    /// * `time_left` - Oracle returning the milliseconds remaining
    ///
    /// # Returns
    ///
    /// A legal move, or `None` if the side to move has no legal move.
    pub fn decide_move<G, D>(&mut self, state: &G, time_left: &D) -> Option<Pos>
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        self.decide_move_with_stats(state, time_left).best_move
    }

    /// Like [`AIEngine::decide_move`], returning search statistics.
    pub fn decide_move_with_stats<G, D>(&mut self, state: &G, time_left: &D) -> MoveResult
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        let start = Instant::now();
        let elapsed_ms = || start.elapsed().as_millis() as u64;
        let player = state.active_player();

        let moves = state.legal_moves(player);
        if moves.is_empty() {
            debug!(?player, "no legal moves");
            return MoveResult::no_move(elapsed_ms());
        }

        if let Some(win) = Self::find_immediate_win(state, &moves) {
            debug!(?player, %win, "immediate win");
            return MoveResult::immediate_win(win, elapsed_ms());
        }

        let result = match self.config.mode {
            SearchMode::IterativeDeepening => MoveResult::from_search(
                self.searcher.get_move(state, time_left),
                SearchType::AlphaBeta,
                elapsed_ms(),
            ),
            SearchMode::Minimax { depth } => MoveResult::from_search(
                self.searcher.get_move_fixed_depth(state, depth, time_left),
                SearchType::Minimax,
                elapsed_ms(),
            ),
        };

        info!(
            ?player,
            best_move = ?result.best_move,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.time_ms,
            search_type = ?result.search_type,
            "move decided"
        );
        result
    }

    /// Choose a move using the configured per-move time limit.
    pub fn get_move<G: Game>(&mut self, state: &G) -> Option<Pos> {
        self.get_move_with_stats(state).best_move
    }

    /// Like [`AIEngine::get_move`], returning search statistics.
    pub fn get_move_with_stats<G: Game>(&mut self, state: &G) -> MoveResult {
        let deadline = Timer::from_millis(self.config.time_limit_ms);
        self.decide_move_with_stats(state, &deadline)
    }

    /// A move after which the opponent has no legal move
    fn find_immediate_win<G: Game>(state: &G, moves: &[Pos]) -> Option<Pos> {
        moves.iter().copied().find(|&mv| {
            let next = state.forecast_move(mv);
            next.legal_moves(next.active_player()).is_empty()
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Switch the leaf heuristic; takes effect on the next decision.
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.config.heuristic = heuristic;
        self.searcher = Searcher::new(&self.config);
    }

    /// Set the per-move time limit used by [`AIEngine::get_move`].
    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.config.time_limit_ms = time_ms;
    }

    /// Clear the transposition cache.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Player};

    fn engine() -> AIEngine {
        AIEngine::with_config(EngineConfig::for_testing().with_time_limit_ms(100))
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.config().mcts_iterations, 10_000);
        assert_eq!(engine.config().mode, SearchMode::IterativeDeepening);
    }

    #[test]
    fn test_engine_no_move() {
        let board = Board::from_parts(
            3,
            3,
            &[Pos::new(1, 2), Pos::new(2, 1)],
            Some(Pos::new(0, 0)),
            Some(Pos::new(2, 2)),
            Player::One,
        )
        .unwrap();
        let mut engine = engine();
        let result = engine.get_move_with_stats(&board);
        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::NoMove);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        // Player two at (0,0) can only escape to (1,2), which player one reaches
        let board = Board::from_parts(
            5,
            5,
            &[Pos::new(2, 1)],
            Some(Pos::new(3, 3)),
            Some(Pos::new(0, 0)),
            Player::One,
        )
        .unwrap();
        let mut engine = engine();
        let result = engine.get_move_with_stats(&board);
        assert_eq!(result.best_move, Some(Pos::new(1, 2)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_empty_board() {
        let board = Board::default();
        let mut engine = engine();
        let result = engine.get_move_with_stats(&board);
        let mv = result.best_move.unwrap();
        assert!(board.move_is_legal(mv));
        assert!(matches!(
            result.search_type,
            SearchType::AlphaBeta | SearchType::Fallback
        ));
    }

    #[test]
    fn test_engine_fallback_when_out_of_time() {
        let board = Board::new(5, 5).unwrap();
        let mut engine = AIEngine::with_config(
            EngineConfig::for_testing().with_time_threshold_ms(10.0),
        );
        let result = engine.decide_move_with_stats(&board, &|| 2.0);
        assert_eq!(result.search_type, SearchType::Fallback);
        assert!(board.move_is_legal(result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_minimax_mode() {
        let board = Board::from_parts(5, 5, &[], Some(Pos::new(2, 2)), Some(Pos::new(0, 0)), Player::One)
            .unwrap();
        let mut engine = AIEngine::with_config(
            EngineConfig::for_testing().with_mode(SearchMode::Minimax { depth: 2 }),
        );
        let result = engine.get_move_with_stats(&board);
        assert_eq!(result.search_type, SearchType::Minimax);
        assert_eq!(result.depth, 2);
        assert!(board.move_is_legal(result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_plays_full_game() {
        let mut board = Board::new(5, 5).unwrap();
        let mut engine = AIEngine::with_config(EngineConfig::for_testing().with_time_limit_ms(20));
        let mut plies = 0;
        while let Some(mv) = engine.get_move(&board) {
            board.apply_move(mv).unwrap();
            plies += 1;
            assert!(plies <= 25);
        }
        // The side to move is stuck
        let stuck = board.active_player();
        assert!(board.is_loser(stuck));
        assert!(board.is_winner(stuck.opponent()));
    }

    #[test]
    fn test_set_heuristic() {
        let mut engine = engine();
        engine.set_heuristic(Heuristic::Distance);
        engine.set_time_limit(250);
        assert_eq!(engine.config().heuristic, Heuristic::Distance);
        assert_eq!(engine.config().time_limit_ms, 250);
    }
}
