//! Symmetry-aware transposition cache
//!
//! Caches search results for early-game positions, keyed by a canonical
//! fingerprint shared by every geometric transform of a position. A position
//! and its mirror images therefore hit the same entry, and the stored best
//! move is mapped back into the caller's orientation on probe.
//!
//! Only positions where both players are placed and at most
//! [`DEFAULT_MAX_BLOCKED`] cells are blocked are cached. Later in the game
//! positions rarely coincide under symmetry and the key is not worth building.
//!
//! # Example
//!
//! ```
//! use isolation::{Board, Player, Pos};
//! use isolation::search::{EntryType, SymmetricTranspositionCache};
//!
//! let mut tt = SymmetricTranspositionCache::default();
//! let board = Board::from_parts(5, 5, &[], Some(Pos::new(0, 0)), Some(Pos::new(2, 2)), Player::One)
//!     .unwrap();
//!
//! tt.store(&board, 3, 1.5, EntryType::Exact, Some(Pos::new(1, 2)));
//!
//! // The left-right mirror image finds the same entry, with the move mirrored
//! let mirrored = Board::from_parts(5, 5, &[], Some(Pos::new(0, 4)), Some(Pos::new(2, 2)), Player::One)
//!     .unwrap();
//! assert_eq!(tt.probe(&mirrored, 3, f64::NEG_INFINITY, f64::INFINITY), Some((1.5, Some(Pos::new(1, 2)))));
//! ```

use std::collections::HashMap;

use tracing::trace;

use super::symmetry::Symmetry;
use crate::board::bitboard::Bitboard;
use crate::board::{Player, Pos};
use crate::game::Game;

/// Largest number of blocked cells for which positions are cached
pub const DEFAULT_MAX_BLOCKED: usize = 3;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a search result against the window it was searched with
    #[inline]
    pub fn classify(score: f64, alpha: f64, beta: f64) -> EntryType {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Fingerprint of a position in one orientation.
///
/// Ordering is lexicographic over occupancy, then player cells, then side to
/// move; the smallest key over all symmetries is the canonical one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranspositionKey {
    blocked: Bitboard,
    locations: [Option<Pos>; 2],
    active: Player,
}

impl TranspositionKey {
    /// Key of `state` after applying `sym` to the occupancy and both player
    /// cells together.
    pub fn under<G: Game>(state: &G, sym: Symmetry) -> Self {
        let (width, height) = (state.width(), state.height());
        let mut blocked = Bitboard::new(width * height);
        for idx in 0..width * height {
            let pos = Pos::from_index(idx, width);
            if !state.is_blank(pos) {
                blocked.set(sym.apply(pos, width, height).to_index(width));
            }
        }
        let locations = [Player::One, Player::Two]
            .map(|p| state.player_location(p).map(|pos| sym.apply(pos, width, height)));
        Self {
            blocked,
            locations,
            active: state.active_player(),
        }
    }
}

/// Cached search result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTEntry {
    /// Remaining search depth this result was computed with
    pub depth: u32,
    /// Score from the searching agent's point of view
    pub score: f64,
    /// Type of score (exact, lower bound, upper bound)
    pub entry_type: EntryType,
    /// Best move, in the orientation of the position it is returned for
    pub best_move: Option<Pos>,
}

/// Hit/miss counters for one decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Probes of cacheable positions
    pub probes: u64,
    /// Probes that returned a usable score
    pub hits: u64,
    /// Entries written (inserts and overwrites)
    pub stores: u64,
    /// Entries currently held
    pub entries: usize,
}

/// Transposition cache keyed on the canonical orientation of a position.
///
/// The cache belongs to one move decision: clear it before each new search
/// root, since occupancy only grows and older entries can never match again.
#[derive(Debug)]
pub struct SymmetricTranspositionCache {
    entries: HashMap<TranspositionKey, TTEntry>,
    max_blocked: usize,
    stats: CacheStats,
}

impl SymmetricTranspositionCache {
    /// Create a cache for positions with at most `max_blocked` blocked cells.
    #[must_use]
    pub fn new(max_blocked: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_blocked,
            stats: CacheStats::default(),
        }
    }

    /// Whether `state` falls in the cached early-game window
    #[inline]
    pub fn is_cacheable<G: Game>(&self, state: &G) -> bool {
        state.player_location(Player::One).is_some()
            && state.player_location(Player::Two).is_some()
            && state.blocked_count() <= self.max_blocked
    }

    /// Keys of `state` under every symmetry of its board.
    ///
    /// Empty outside the cached window.
    #[must_use]
    pub fn canonical_keys<G: Game>(&self, state: &G) -> Vec<(Symmetry, TranspositionKey)> {
        if !self.is_cacheable(state) {
            return Vec::new();
        }
        Symmetry::for_board(state.width(), state.height())
            .iter()
            .map(|&sym| (sym, TranspositionKey::under(state, sym)))
            .collect()
    }

    /// Smallest key of `state` and the transform producing it.
    #[must_use]
    pub fn canonical_key<G: Game>(&self, state: &G) -> Option<(Symmetry, TranspositionKey)> {
        self.canonical_keys(state)
            .into_iter()
            .min_by(|a, b| a.1.cmp(&b.1))
    }

    /// Raw entry for `state`, whatever its depth or bound.
    ///
    /// The best move is returned in `state`'s own orientation.
    #[must_use]
    pub fn lookup<G: Game>(&self, state: &G) -> Option<TTEntry> {
        let (sym, key) = self.canonical_key(state)?;
        let entry = self.entries.get(&key)?;
        let inverse = sym.inverse();
        Some(TTEntry {
            best_move: entry
                .best_move
                .map(|mv| inverse.apply(mv, state.width(), state.height())),
            ..*entry
        })
    }

    /// Probe for a score usable at this node.
    ///
    /// An entry is usable if it was searched to exactly `depth` and its
    /// bound is compatible with the current `alpha`/`beta` window.
    ///
    /// # Returns
    ///
    /// * `Some((score, best_move))` - usable cached result
    /// * `None` - miss, or the position is outside the cached window
    pub fn probe<G: Game>(
        &mut self,
        state: &G,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Option<(f64, Option<Pos>)> {
        if !self.is_cacheable(state) {
            return None;
        }
        self.stats.probes += 1;
        let entry = self.lookup(state)?;
        if entry.depth != depth {
            return None;
        }
        let usable = match entry.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => entry.score >= beta,
            EntryType::UpperBound => entry.score <= alpha,
        };
        if usable {
            self.stats.hits += 1;
            trace!(depth, score = entry.score, "tt hit");
            Some((entry.score, entry.best_move))
        } else {
            None
        }
    }

    /// Store a result for `state`, overwriting any entry for the same
    /// canonical position.
    ///
    /// # Arguments
    ///
    /// * `depth` - Remaining depth the result was searched to
    /// * `score` - Score from the agent's point of view
    /// * `entry_type` - How `score` relates to the true value
    /// * `best_move` - Best move in `state`'s orientation
    pub fn store<G: Game>(
        &mut self,
        state: &G,
        depth: u32,
        score: f64,
        entry_type: EntryType,
        best_move: Option<Pos>,
    ) {
        let Some((sym, key)) = self.canonical_key(state) else {
            return;
        };
        let best_move = best_move.map(|mv| sym.apply(mv, state.width(), state.height()));
        self.entries.insert(
            key,
            TTEntry {
                depth,
                score,
                entry_type,
                best_move,
            },
        );
        self.stats.stores += 1;
    }

    /// Drop all entries and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            ..self.stats
        }
    }
}

impl Default for SymmetricTranspositionCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BLOCKED)
    }
}
