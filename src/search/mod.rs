//! Search module for the Isolation AI
//!
//! Contains:
//! - Deadlines polled throughout the search
//! - Board symmetries and the symmetric transposition cache
//! - Alpha-Beta search with iterative deepening, and plain minimax
//! - Monte Carlo tree search used as a leaf evaluator

pub mod alphabeta;
pub mod deadline;
pub mod mcts;
pub mod symmetry;
pub mod tt;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use deadline::{Deadline, SearchTimeout, Timer, Unlimited};
pub use mcts::{MctsConfig, MctsOutcome, MctsSearch, MctsTree};
pub use symmetry::Symmetry;
pub use tt::{CacheStats, EntryType, SymmetricTranspositionCache, TTEntry, TranspositionKey};
