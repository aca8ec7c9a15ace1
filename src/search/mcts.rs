//! Monte Carlo Tree Search with UCB1 selection
//!
//! A fresh tree is built on every call and dropped when the call returns;
//! no statistics survive between moves. Each iteration runs four phases:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCB1
//! 2. **Expansion**: add one random unexpanded move as a new child
//! 3. **Rollout**: play uniformly random moves until the side to move is stuck
//! 4. **Backpropagation**: reward 1 if the searching player did not run out of
//!    moves, 0 otherwise, added to every node on the path
//!
//! The deadline is polled at the start of every iteration and at every step of
//! selection, rollout and backpropagation.
//!
//! # Example
//!
//! ```
//! use isolation::{Board, Player};
//! use isolation::search::{MctsConfig, MctsSearch, Unlimited};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::new(4, 4).unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let search = MctsSearch::new(MctsConfig::for_testing());
//! let outcome = search.run(&board, Player::One, &mut rng, &Unlimited).unwrap();
//! assert!(outcome.best_move.is_some());
//! assert!(outcome.score >= 1.0);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::deadline::{Deadline, SearchTimeout};
use crate::board::{Player, Pos};
use crate::game::Game;

/// Default number of iterations per search
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Select/expand/rollout/backpropagate cycles per call
    pub iterations: u32,

    /// Exploration constant `c` in `w/n + sqrt(c * ln(N) / n)`
    pub exploration: f64,

    /// Abort once fewer milliseconds than this remain
    pub time_threshold_ms: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration: 2.0,
            time_threshold_ms: 10.0,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            time_threshold_ms: 0.0,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the deadline threshold.
    pub fn with_time_threshold_ms(mut self, ms: f64) -> Self {
        self.time_threshold_ms = ms;
        self
    }
}

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// One position reached during the search.
///
/// `children` and `not_expanded` are disjoint and together hold exactly the
/// legal moves of `state`.
#[derive(Debug, Clone)]
pub struct MctsNode<G> {
    /// Move that led here from the parent (`None` for the root)
    pub mv: Option<Pos>,
    /// Parent node (`None` for the root)
    pub parent: Option<NodeId>,
    pub state: G,
    pub visit_count: u32,
    /// Sum of rewards for the searching player
    pub win_count: f64,
    pub children: Vec<NodeId>,
    pub not_expanded: Vec<Pos>,
}

impl<G: Game> MctsNode<G> {
    fn new(state: G, mv: Option<Pos>, parent: Option<NodeId>) -> Self {
        let not_expanded = state.legal_moves(state.active_player());
        Self {
            mv,
            parent,
            state,
            visit_count: 0,
            win_count: 0.0,
            children: Vec::new(),
            not_expanded,
        }
    }

    /// Observed win rate (0 for an unvisited node)
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_count / self.visit_count as f64
        }
    }

    /// UCB1 score of this node as a child of a node with `parent_visits`.
    #[inline]
    pub fn ucb_score(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        self.win_rate() + (exploration * ln_parent_visits / self.visit_count as f64).sqrt()
    }
}

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<G> {
    nodes: Vec<MctsNode<G>>,
}

impl<G: Game> MctsTree<G> {
    /// Create a tree holding only the root position.
    pub fn new(root_state: G) -> Self {
        Self {
            nodes: vec![MctsNode::new(root_state, None, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<G> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child with the highest UCB1 score; the first one wins ties.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let ln_visits = (node.visit_count as f64).ln();
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self.get(child).ucb_score(ln_visits, exploration);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Expand `mv` from `parent_id`, moving it out of the unexpanded set.
    pub fn add_child(&mut self, parent_id: NodeId, mv: Pos) -> NodeId {
        let parent = self.get_mut(parent_id);
        parent.not_expanded.retain(|&m| m != mv);
        let state = parent.state.forecast_move(mv);

        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(MctsNode::new(state, Some(mv), Some(parent_id)));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Most visited child of the root and its visit count
    pub fn best_child(&self) -> Option<(Pos, u32)> {
        let root = self.get(self.root());
        let mut best: Option<(Pos, u32)> = None;
        for &child in &root.children {
            let node = self.get(child);
            if let Some(mv) = node.mv {
                if best.map_or(true, |(_, v)| node.visit_count > v) {
                    best = Some((mv, node.visit_count));
                }
            }
        }
        best
    }
}

/// Result of one MCTS call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsOutcome {
    /// Visit count of the most visited root child, or -1 without legal moves
    pub score: f64,
    /// Move leading to the most visited root child
    pub best_move: Option<Pos>,
    /// Iterations run
    pub iterations: u32,
    /// Nodes in the tree when the search finished
    pub tree_size: usize,
}

/// UCB1 Monte Carlo Tree Search.
#[derive(Debug, Clone, Copy, Default)]
pub struct MctsSearch {
    config: MctsConfig,
}

impl MctsSearch {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Search `state` on behalf of `player`.
    ///
    /// The score is the visit count of the most explored root move, used by
    /// the alpha-beta search as a leaf value. Positions where the side to
    /// move has no legal move score `-1`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchTimeout`] if the deadline fires before the iteration
    /// budget is exhausted; the partial tree is discarded.
    pub fn run<G, R, D>(
        &self,
        state: &G,
        player: Player,
        rng: &mut R,
        deadline: &D,
    ) -> Result<MctsOutcome, SearchTimeout>
    where
        G: Game,
        R: Rng + ?Sized,
        D: Deadline + ?Sized,
    {
        let threshold = self.config.time_threshold_ms;
        let mut tree = MctsTree::new(state.clone());
        let root = tree.root();

        if tree.get(root).not_expanded.is_empty() {
            return Ok(MctsOutcome {
                score: -1.0,
                best_move: None,
                iterations: 0,
                tree_size: 1,
            });
        }

        for _ in 0..self.config.iterations {
            deadline.check(threshold)?;

            // Selection
            let mut node_id = root;
            while tree.get(node_id).not_expanded.is_empty() {
                deadline.check(threshold)?;
                match tree.select_child(node_id, self.config.exploration) {
                    Some(child) => node_id = child,
                    None => break,
                }
            }

            // Expansion
            let pick = tree.get(node_id).not_expanded.choose(rng).copied();
            if let Some(mv) = pick {
                node_id = tree.add_child(node_id, mv);
            }

            // Rollout
            let mut game = tree.get(node_id).state.clone();
            loop {
                deadline.check(threshold)?;
                let moves = game.legal_moves(game.active_player());
                match moves.choose(rng) {
                    Some(&mv) => game = game.forecast_move(mv),
                    None => break,
                }
            }

            // Backpropagation
            let reward = if game.inactive_player() == player { 1.0 } else { 0.0 };
            let mut current = Some(node_id);
            while let Some(id) = current {
                deadline.check(threshold)?;
                let node = tree.get_mut(id);
                node.visit_count += 1;
                node.win_count += reward;
                current = node.parent;
            }
        }

        let best = tree.best_child();
        let outcome = MctsOutcome {
            score: best.map_or(-1.0, |(_, visits)| visits as f64),
            best_move: best.map(|(mv, _)| mv),
            iterations: self.config.iterations,
            tree_size: tree.len(),
        };
        debug!(
            iterations = outcome.iterations,
            tree_size = outcome.tree_size,
            score = outcome.score,
            "mcts finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::search::deadline::Unlimited;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// Player one at (0,0) can move to (1,2), leaving player two at (2,0)
    /// stuck, or to the dead end (2,1), after which player two escapes to
    /// (1,2) and player one is stuck.
    fn one_move_win() -> Board {
        Board::from_parts(
            4,
            4,
            &[
                Pos::new(0, 1),
                Pos::new(3, 2),
                Pos::new(0, 2),
                Pos::new(1, 3),
                Pos::new(3, 3),
            ],
            Some(Pos::new(0, 0)),
            Some(Pos::new(2, 0)),
            Player::One,
        )
        .unwrap()
    }

    fn run(board: &Board, iterations: u32, seed: u64) -> MctsOutcome {
        let search = MctsSearch::new(MctsConfig::for_testing().with_iterations(iterations));
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        search.run(board, Player::One, &mut rng, &Unlimited).unwrap()
    }

    #[test]
    fn test_tree_add_child() {
        let board = Board::new(3, 3).unwrap();
        let mut tree = MctsTree::new(board);
        let root = tree.root();
        assert_eq!(tree.get(root).not_expanded.len(), 9);

        let child = tree.add_child(root, Pos::new(1, 1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(root).children, vec![child]);
        assert_eq!(tree.get(root).not_expanded.len(), 8);
        assert!(!tree.get(root).not_expanded.contains(&Pos::new(1, 1)));
        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.get(child).mv, Some(Pos::new(1, 1)));
        // Player two, unplaced, may take any of the 8 remaining cells
        assert_eq!(tree.get(child).not_expanded.len(), 8);
    }

    #[test]
    fn test_select_child_ucb() {
        let board = Board::new(3, 3).unwrap();
        let mut tree = MctsTree::new(board);
        let root = tree.root();
        let a = tree.add_child(root, Pos::new(0, 0));
        let b = tree.add_child(root, Pos::new(1, 1));

        tree.get_mut(root).visit_count = 10;
        tree.get_mut(a).visit_count = 5;
        tree.get_mut(a).win_count = 1.0;
        tree.get_mut(b).visit_count = 5;
        tree.get_mut(b).win_count = 4.0;
        assert_eq!(tree.select_child(root, 2.0), Some(b));

        // Equal scores: first child in iteration order
        tree.get_mut(b).win_count = 1.0;
        assert_eq!(tree.select_child(root, 2.0), Some(a));
    }

    #[test]
    fn test_no_legal_moves_scores_minus_one() {
        let board = Board::from_parts(
            3,
            3,
            &[Pos::new(1, 2), Pos::new(2, 1)],
            Some(Pos::new(0, 0)),
            Some(Pos::new(2, 2)),
            Player::One,
        )
        .unwrap();
        let outcome = run(&board, 50, 1);
        assert_eq!(outcome.score, -1.0);
        assert_eq!(outcome.best_move, None);
    }

    #[test]
    fn test_root_visits_sum_to_iterations() {
        let board = Board::new(4, 4).unwrap();
        let search = MctsSearch::new(MctsConfig::for_testing().with_iterations(300));
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let outcome = search.run(&board, Player::One, &mut rng, &Unlimited).unwrap();
        assert_eq!(outcome.iterations, 300);
        // 300 iterations on 16 root moves: the best child was visited at least
        // its fair share
        assert!(outcome.score >= 300.0 / 16.0);
        assert!(outcome.score <= 300.0);
    }

    #[test]
    fn test_visits_monotone_in_budget() {
        let board = Board::new(4, 4).unwrap();
        let mut last = 0.0;
        for iterations in [50, 100, 200, 400, 800] {
            let outcome = run(&board, iterations, 11);
            assert!(outcome.score >= last, "{iterations}: {} < {last}", outcome.score);
            last = outcome.score;
        }
    }

    #[test]
    fn test_prefers_winning_move() {
        let board = one_move_win();
        assert_eq!(board.legal_moves(Player::One), vec![Pos::new(1, 2), Pos::new(2, 1)]);

        let outcome = run(&board, 1000, 5);
        assert_eq!(outcome.best_move, Some(Pos::new(1, 2)));
        // The winning child gets strictly more than half of the visits,
        // so strictly more than the losing one
        assert!(outcome.score > 500.0);
    }

    #[test]
    fn test_deadline_aborts() {
        let board = Board::new(4, 4).unwrap();
        let search = MctsSearch::new(MctsConfig::default().with_time_threshold_ms(10.0));
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let out_of_time = || 5.0;
        assert_eq!(
            search.run(&board, Player::One, &mut rng, &out_of_time),
            Err(SearchTimeout)
        );
    }
}
