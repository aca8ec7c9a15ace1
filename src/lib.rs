//! Isolation AI engine
//!
//! A time-bounded adversarial search engine for Isolation played with knight
//! moves:
//! - Rectangular board, 7x7 by default
//! - Each player has one piece; the first move may go to any empty cell
//! - Afterwards pieces move like chess knights onto never-visited cells
//! - Every visited cell stays blocked for the rest of the game
//! - The player to move with no legal move loses
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`game`]: The [`Game`] trait the search is written against
//! - [`board`]: Board representation with bitboards
//! - [`eval`]: Leaf heuristics
//! - [`search`]: Alpha-beta, minimax, Monte Carlo tree search and the
//!   symmetric transposition cache
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: TOML and environment configuration
//!
//! # Quick Start
//!
//! ```
//! use isolation::{AIEngine, Board, Game, Pos};
//! use isolation::config::EngineConfig;
//! use isolation::search::Timer;
//!
//! let mut board = Board::new(5, 5).unwrap();
//! let mut engine = AIEngine::with_config(EngineConfig::for_testing());
//!
//! board.apply_move(Pos::new(2, 2)).unwrap();
//!
//! // AI responds as player two with a 100ms budget
//! if let Some(pos) = engine.decide_move(&board, &Timer::from_millis(100)) {
//!     board.apply_move(pos).unwrap();
//!     println!("AI plays at {pos}");
//! }
//! assert_eq!(board.blocked_count(), 2);
//! ```
//!
//! # Search
//!
//! For each decision the engine:
//! 1. Returns `None` if the side to move is stuck
//! 2. Plays a move that leaves the opponent stuck, if there is one
//! 3. Runs iterative deepening alpha-beta until the deadline (or fixed-depth
//!    minimax when configured)
//! 4. Falls back to a random legal move if not even depth 1 completed

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Player, Pos, DEFAULT_SIZE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{Error, Result};
pub use game::Game;
