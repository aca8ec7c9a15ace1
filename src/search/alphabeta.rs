//! Alpha-Beta search with iterative deepening and a symmetric transposition cache
//!
//! Values are always from the point of view of the *agent*: the player to
//! move at the root. Layers where the agent moves maximize, the others
//! minimize, and every leaf is scored for the agent.
//!
//! # Features
//!
//! - Iterative deepening bounded by a [`Deadline`]; only fully completed
//!   depths are trusted
//! - Symmetry-aware transposition cache for early-game positions
//! - Random initial best move, so a move is always available under pruning
//! - Fixed-depth minimax without pruning
//! - Pluggable leaf [`Heuristic`], including Monte Carlo tree search
//!
//! # Example
//!
//! ```
//! use isolation::{Board, Game, Player};
//! use isolation::config::EngineConfig;
//! use isolation::search::{Searcher, Timer};
//!
//! let mut searcher = Searcher::new(&EngineConfig::for_testing());
//! let board = Board::new(5, 5).unwrap();
//!
//! let result = searcher.get_move(&board, &Timer::from_millis(200));
//! let best_move = result.best_move.unwrap();
//! assert!(board.legal_moves(Player::One).contains(&best_move));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use super::deadline::{Deadline, SearchTimeout};
use super::mcts::{MctsConfig, MctsSearch};
use super::tt::{CacheStats, EntryType, SymmetricTranspositionCache};
use crate::board::{Player, Pos};
use crate::config::EngineConfig;
use crate::eval::{evaluate, terminal_score, Heuristic};
use crate::game::Game;

const INF: f64 = f64::INFINITY;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Leaf evaluations
    pub evaluations: u64,
    /// Alpha or beta cutoffs
    pub cutoffs: u64,
    /// Transposition cache counters
    pub cache: CacheStats,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found; `None` only when the agent has no legal move
    pub best_move: Option<Pos>,
    /// Value of the last completed depth, from the agent's point of view
    pub score: f64,
    /// Last fully completed depth (0 if none completed)
    pub depth: u32,
    /// Total nodes searched, including abandoned iterations
    pub nodes: u64,
    /// Whether the deadline cut the search short
    pub timed_out: bool,
    /// Search diagnostics
    pub stats: SearchStats,
}

impl SearchResult {
    fn empty() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            depth: 0,
            nodes: 0,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }
}

/// Depth-limited game-tree searcher.
///
/// A searcher is reusable across moves, but everything it learns (the
/// transposition cache in particular) is scoped to one call of
/// [`Searcher::get_move`] or [`Searcher::get_move_fixed_depth`].
pub struct Searcher {
    heuristic: Heuristic,
    depth_cap: u32,
    time_threshold_ms: f64,
    use_cache: bool,
    mcts: MctsSearch,
    tt: SymmetricTranspositionCache,
    rng: ChaCha20Rng,
    /// Player the search is choosing a move for
    agent: Player,
    nodes: u64,
    stats: SearchStats,
    /// Set when an iteration stopped at the depth limit rather than at the
    /// end of the game
    hit_depth_limit: bool,
}

impl Searcher {
    /// Create a searcher from the engine configuration.
    ///
    /// Uses `config.seed` for tie-breaking when set, entropy otherwise.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a searcher with an explicit random source.
    #[must_use]
    pub fn with_rng(config: &EngineConfig, rng: ChaCha20Rng) -> Self {
        let mcts = MctsSearch::new(
            MctsConfig::default()
                .with_iterations(config.mcts_iterations)
                .with_time_threshold_ms(config.time_threshold_ms),
        );
        Self {
            heuristic: config.heuristic,
            depth_cap: config.search_depth_cap.max(1),
            time_threshold_ms: config.time_threshold_ms,
            use_cache: config.use_cache,
            mcts,
            tt: SymmetricTranspositionCache::new(config.cache_max_blocked),
            rng,
            agent: Player::One,
            nodes: 0,
            stats: SearchStats::default(),
            hit_depth_limit: false,
        }
    }

    /// Choose a move by iterative deepening.
    ///
    /// Runs alpha-beta at depth 1, 2, 3, ... up to the depth cap. When the
    /// deadline fires, the result of the last completed depth is returned;
    /// if not even depth 1 completed, a uniformly random legal move is.
    /// Stops early once a depth completes without reaching the depth limit
    /// anywhere, since deeper iterations cannot change the result.
    pub fn get_move<G, D>(&mut self, state: &G, deadline: &D) -> SearchResult
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        let Some(moves) = self.begin(state) else {
            return SearchResult::empty();
        };
        let mut result = SearchResult::empty();

        for depth in 1..=self.depth_cap {
            self.hit_depth_limit = false;
            match self.search_node(state, depth, -INF, INF, deadline) {
                Ok((best_move, score)) => {
                    result.best_move = best_move;
                    result.score = score;
                    result.depth = depth;
                    debug!(depth, score, nodes = self.nodes, ?best_move, "depth complete");
                    if !self.hit_depth_limit {
                        debug!(depth, "game tree exhausted");
                        break;
                    }
                }
                Err(SearchTimeout) => {
                    debug!(depth, completed = result.depth, "search timed out");
                    result.timed_out = true;
                    break;
                }
            }
        }

        self.finish(result, &moves)
    }

    /// Choose a move with plain minimax at a fixed depth.
    ///
    /// If the deadline fires, a uniformly random legal move is returned.
    pub fn get_move_fixed_depth<G, D>(&mut self, state: &G, depth: u32, deadline: &D) -> SearchResult
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        let Some(moves) = self.begin(state) else {
            return SearchResult::empty();
        };
        let mut result = SearchResult::empty();

        match self.minimax_root(state, depth.max(1), deadline) {
            Ok((best_move, score)) => {
                result.best_move = best_move;
                result.score = score;
                result.depth = depth.max(1);
            }
            Err(SearchTimeout) => {
                debug!(depth, "minimax timed out");
                result.timed_out = true;
            }
        }

        self.finish(result, &moves)
    }

    /// Reset per-decision state. `None` when the agent has no legal move.
    fn begin<G: Game>(&mut self, state: &G) -> Option<Vec<Pos>> {
        self.agent = state.active_player();
        self.nodes = 0;
        self.stats = SearchStats::default();
        self.tt.clear();

        let moves = state.legal_moves(self.agent);
        if moves.is_empty() {
            debug!(agent = ?self.agent, "no legal moves");
            None
        } else {
            Some(moves)
        }
    }

    fn finish(&mut self, mut result: SearchResult, moves: &[Pos]) -> SearchResult {
        if result.best_move.is_none() {
            result.best_move = moves.choose(&mut self.rng).copied();
            debug!(fallback = ?result.best_move, "no completed depth, playing random move");
        }
        result.nodes = self.nodes;
        self.stats.cache = self.tt.stats();
        result.stats = self.stats;
        result
    }

    /// Alpha-beta search of `state` to `depth` plies for the player to move.
    ///
    /// Returns the best move (`None` at a terminal or depth-0 node) and its
    /// value. The transposition cache is cleared first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchTimeout`] if the deadline fires during the search.
    pub fn alpha_beta<G, D>(
        &mut self,
        state: &G,
        depth: u32,
        alpha: f64,
        beta: f64,
        deadline: &D,
    ) -> Result<(Option<Pos>, f64), SearchTimeout>
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        self.agent = state.active_player();
        self.tt.clear();
        self.search_node(state, depth, alpha, beta, deadline)
    }

    /// Minimax search (no pruning, no cache) of `state` to `depth` plies for
    /// the player to move.
    ///
    /// Returns the first move with the best value, or `None` at a terminal
    /// or depth-0 node.
    ///
    /// # Errors
    ///
    /// Returns [`SearchTimeout`] if the deadline fires during the search.
    pub fn minimax<G, D>(
        &mut self,
        state: &G,
        depth: u32,
        deadline: &D,
    ) -> Result<(Option<Pos>, f64), SearchTimeout>
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        self.agent = state.active_player();
        self.minimax_root(state, depth, deadline)
    }

    fn search_node<G, D>(
        &mut self,
        state: &G,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        deadline: &D,
    ) -> Result<(Option<Pos>, f64), SearchTimeout>
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        deadline.check(self.time_threshold_ms)?;
        self.nodes += 1;

        let moves = state.legal_moves(state.active_player());
        if depth == 0 || moves.is_empty() {
            if !moves.is_empty() {
                self.hit_depth_limit = true;
            }
            return Ok((None, self.evaluate(state, deadline)?));
        }

        if self.use_cache {
            // Entries are only reused within the iteration that stored them,
            // so the depth-limit flag already covers the cached subtree
            if let Some((score, best_move)) = self.tt.probe(state, depth, alpha, beta) {
                return Ok((best_move, score));
            }
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best_move = moves.choose(&mut self.rng).copied();
        let maximizing = state.active_player() == self.agent;
        let mut value = if maximizing { -INF } else { INF };

        for &mv in &moves {
            let child = state.forecast_move(mv);
            let (_, score) = self.search_node(&child, depth - 1, alpha, beta, deadline)?;

            if maximizing {
                if score > value {
                    value = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_move = Some(mv);
                }
                beta = beta.min(value);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if self.use_cache {
            let entry_type = EntryType::classify(value, orig_alpha, orig_beta);
            self.tt.store(state, depth, value, entry_type, best_move);
        }
        Ok((best_move, value))
    }

    fn minimax_root<G, D>(
        &mut self,
        state: &G,
        depth: u32,
        deadline: &D,
    ) -> Result<(Option<Pos>, f64), SearchTimeout>
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        deadline.check(self.time_threshold_ms)?;
        self.nodes += 1;

        let moves = state.legal_moves(state.active_player());
        if depth == 0 || moves.is_empty() {
            return Ok((None, self.evaluate(state, deadline)?));
        }

        let maximizing = state.active_player() == self.agent;
        let mut best: Option<(Pos, f64)> = None;
        for &mv in &moves {
            let (_, score) = self.minimax_root(&state.forecast_move(mv), depth - 1, deadline)?;
            let better = match best {
                None => true,
                Some((_, v)) if maximizing => score > v,
                Some((_, v)) => score < v,
            };
            if better {
                best = Some((mv, score));
            }
        }
        Ok(match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, 0.0),
        })
    }

    /// Score a leaf for the agent with the configured heuristic.
    fn evaluate<G, D>(&mut self, state: &G, deadline: &D) -> Result<f64, SearchTimeout>
    where
        G: Game,
        D: Deadline + ?Sized,
    {
        self.stats.evaluations += 1;
        if let Some(score) = evaluate(state, self.agent, self.heuristic) {
            return Ok(score);
        }
        if let Some(score) = terminal_score(state, self.agent) {
            return Ok(score);
        }
        let outcome = self.mcts.run(state, self.agent, &mut self.rng, deadline)?;
        Ok(outcome.score)
    }

    /// Player the last search chose a move for
    #[inline]
    pub fn agent(&self) -> Player {
        self.agent
    }

    /// Transposition cache counters for the last search
    #[must_use]
    pub fn tt_stats(&self) -> CacheStats {
        self.tt.stats()
    }

    /// Clear the transposition cache.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}
