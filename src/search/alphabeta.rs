//! Alpha-Beta evaluation of a search tree
//!
//! This module implements the core search algorithm. It walks a
//! [`SearchTree`] depth-first with minimax and alpha-beta pruning, expands
//! nodes on first visit (a no-op when the tree was built eagerly), and
//! writes the chosen successor of every exactly-evaluated interior node into
//! a [`MoveCache`].
//!
//! # Scoring
//!
//! Terminal positions score `win_score - depth` for a maximizer win and
//! `depth - win_score` for a loss, so faster wins and slower losses are
//! preferred. A non-terminal node without successors scores the sign of its
//! utility.
//!
//! # Example
//!
//! ```
//! use minimax::board::{Board, Mark};
//! use minimax::rules::TicTacToe;
//! use minimax::search::{Evaluator, MoveCache, SearchTree};
//! use minimax::Expansion;
//!
//! let rules = TicTacToe::new(Mark::O);
//! let board = Board::parse("110000000", "000110000", Mark::O).unwrap();
//!
//! let mut tree = SearchTree::build(&rules, board, true, Expansion::Lazy);
//! let mut cache = MoveCache::new();
//! let stats = Evaluator::new(&rules, &mut cache, 100).evaluate(&mut tree);
//!
//! assert_eq!(stats.root_value, Some(99)); // O wins on the next ply
//! assert!(cache.contains(&board));
//! ```

use std::time::{Duration, Instant};

use tracing::trace;

use crate::rules::Rules;

use super::cache::MoveCache;
use super::tree::{NodeId, SearchTree};

/// Score of a terminal node with utility `utility` at `depth`.
///
/// Only the sign of `utility` matters. Scores saturate at `±1` so that a
/// win or loss found deeper than `win_score` plies never reads as a draw
/// or the opposite result.
#[inline]
pub fn terminal_score(utility: i32, depth: u32, win_score: i32) -> i32 {
    let depth = depth.min(i32::MAX as u32) as i32;
    match utility.signum() {
        1 => (win_score - depth).max(1),
        -1 => (depth - win_score).min(-1),
        _ => 0,
    }
}

/// Counters collected while evaluating one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Nodes allocated in the arena
    pub nodes: u64,
    /// Nodes the evaluator assigned a value to
    pub evaluated: u64,
    /// Nodes whose children were materialized
    pub expansions: u64,
    /// Remaining siblings skipped by a beta or alpha cutoff
    pub cutoffs: u64,
    /// Interior nodes written to the cache
    pub cached: u64,
    /// Interior nodes whose value was only a bound and were not cached
    pub bounded: u64,
    /// Value of the root, from the maximizer's perspective
    pub root_value: Option<i32>,
    /// Wall time spent building and evaluating
    pub elapsed: Duration,
}

/// Minimax evaluator with alpha-beta pruning.
///
/// Borrows the rules and the cache it fills for the duration of one build.
pub struct Evaluator<'a, R: Rules> {
    rules: &'a R,
    cache: &'a mut MoveCache<R::State>,
    win_score: i32,
    stats: BuildStats,
}

impl<'a, R: Rules> Evaluator<'a, R> {
    pub fn new(rules: &'a R, cache: &'a mut MoveCache<R::State>, win_score: i32) -> Self {
        Self {
            rules,
            cache,
            win_score,
            stats: BuildStats::default(),
        }
    }

    /// Evaluate `tree` from its root with the full window and return the
    /// statistics of the run.
    pub fn evaluate(mut self, tree: &mut SearchTree<R::State>) -> BuildStats {
        let start = Instant::now();
        let expansions_before = tree.expansions();

        // Every reachable score lies in [-win_score, win_score]
        let bound = self.win_score + 1;
        let root = tree.root();
        let value = self.alphabeta(tree, root, -bound, bound);

        self.stats.root_value = Some(value);
        self.stats.nodes = tree.len() as u64;
        self.stats.expansions = tree.expansions();
        self.stats.elapsed = start.elapsed();
        trace!(
            lazy_expansions = tree.expansions() - expansions_before,
            root_value = value,
            "tree evaluated"
        );
        self.stats
    }

    /// Assign a value to `id` given the window `(alpha, beta)` inherited
    /// from its parent, and return it.
    ///
    /// Fail-soft: the result is exact when it lies strictly inside the
    /// window, an upper bound when `<= alpha` and a lower bound when
    /// `>= beta`. Only exact interior nodes are cached.
    fn alphabeta(
        &mut self,
        tree: &mut SearchTree<R::State>,
        id: NodeId,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        {
            let node = tree.get_mut(id);

            // A node is visited once per build; a recorded best child means
            // its value is already final.
            if node.best_child.is_some() {
                if let Some(value) = node.value {
                    return value;
                }
            }

            node.alpha = alpha;
            node.beta = beta;
        }
        self.stats.evaluated += 1;

        let node = tree.get(id);
        if node.terminal {
            let utility = self.rules.utility(&node.state);
            let value = terminal_score(utility, node.depth, self.win_score);
            tree.get_mut(id).value = Some(value);
            return value;
        }

        let children = tree.expand(self.rules, id);
        if children.is_empty() {
            // Dead end: the rules offer no move in a live position. Clamped
            // to -1/0/1 so it can never outrank a win found in the tree.
            let value = self.rules.utility(&tree.get(id).state).signum();
            tree.get_mut(id).value = Some(value);
            return value;
        }

        let maximizing = tree.get(id).maximizing;
        let mut window = (alpha, beta);
        let mut best: Option<(NodeId, i32)> = None;

        for (i, child) in children.iter().enumerate() {
            let value = self.alphabeta(tree, child, window.0, window.1);

            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some((child, value));
            }

            // `best` is always set after the first child
            let best_value = best.map_or(value, |(_, v)| v);
            if maximizing {
                window.0 = window.0.max(best_value);
            } else {
                window.1 = window.1.min(best_value);
            }

            if window.1 <= window.0 {
                self.stats.cutoffs += (children.len() - i - 1) as u64;
                break;
            }
        }

        let Some((best_child, value)) = best else {
            return 0;
        };

        let node = tree.get_mut(id);
        node.value = Some(value);
        node.best_child = Some(best_child);

        if alpha < value && value < beta {
            let state = tree.get(id).state.clone();
            let next = tree.get(best_child).state.clone();
            self.cache.store(state, next);
            self.stats.cached += 1;
        } else {
            self.stats.bounded += 1;
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Expansion;
    use crate::rules::FnRules;
    use std::collections::HashMap;

    /// Explicit game graph: state -> (terminal utility, successors)
    struct Graph {
        nodes: HashMap<u32, (Option<i32>, Vec<u32>)>,
    }

    impl Graph {
        fn new(edges: &[(u32, Option<i32>, &[u32])]) -> Self {
            Self {
                nodes: edges
                    .iter()
                    .map(|(id, utility, next)| (*id, (*utility, next.to_vec())))
                    .collect(),
            }
        }
    }

    impl Rules for Graph {
        type State = u32;

        fn is_terminal(&self, state: &u32) -> bool {
            self.nodes.get(state).map_or(true, |(u, _)| u.is_some())
        }

        fn utility(&self, state: &u32) -> i32 {
            self.nodes.get(state).and_then(|(u, _)| *u).unwrap_or(0)
        }

        fn successors(&self, state: &u32) -> Vec<u32> {
            self.nodes.get(state).map(|(_, n)| n.clone()).unwrap_or_default()
        }
    }

    fn evaluate(rules: &impl Rules<State = u32>, root: u32, maximizing: bool) -> (BuildStats, MoveCache<u32>) {
        let mut tree = SearchTree::build(rules, root, maximizing, Expansion::Lazy);
        let mut cache = MoveCache::new();
        let stats = Evaluator::new(rules, &mut cache, 100).evaluate(&mut tree);
        (stats, cache)
    }

    #[test]
    fn test_terminal_score_policy() {
        assert_eq!(terminal_score(1, 3, 100), 97);
        assert_eq!(terminal_score(-1, 3, 100), -97);
        assert_eq!(terminal_score(0, 3, 100), 0);
        // Only the sign counts
        assert_eq!(terminal_score(5, 1, 100), 99);
        assert_eq!(terminal_score(-7, 1, 100), -99);
    }

    #[test]
    fn test_terminal_score_never_crosses_zero() {
        assert_eq!(terminal_score(1, 150, 100), 1);
        assert_eq!(terminal_score(-1, 150, 100), -1);
    }

    #[test]
    fn test_terminal_root_has_value_and_no_move() {
        let rules = Graph::new(&[(0, Some(1), &[])]);
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(100));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_prefers_fastest_win() {
        // 1 wins two plies later, 2 wins at once
        let rules = Graph::new(&[
            (0, None, &[1, 2]),
            (1, None, &[3]),
            (2, Some(1), &[]),
            (3, None, &[4]),
            (4, Some(1), &[]),
        ]);
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(99));
        assert_eq!(cache.get(&0), Some(&2));
    }

    #[test]
    fn test_prefers_slowest_loss() {
        let rules = Graph::new(&[
            (0, None, &[1, 2]),
            (1, Some(-1), &[]),
            (2, None, &[3]),
            (3, None, &[4]),
            (4, Some(-1), &[]),
        ]);
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(-97));
        assert_eq!(cache.get(&0), Some(&2));
    }

    #[test]
    fn test_ties_keep_first_child() {
        let rules = Graph::new(&[
            (0, None, &[1, 2, 3]),
            (1, Some(0), &[]),
            (2, Some(0), &[]),
            (3, Some(0), &[]),
        ]);
        let (_, cache) = evaluate(&rules, 0, true);
        assert_eq!(cache.get(&0), Some(&1));

        let (_, cache) = evaluate(&rules, 0, false);
        assert_eq!(cache.get(&0), Some(&1));
    }

    #[test]
    fn test_minimizer_picks_lowest() {
        let rules = Graph::new(&[
            (0, None, &[1, 2]),
            (1, Some(1), &[]),
            (2, Some(-1), &[]),
        ]);
        let (stats, cache) = evaluate(&rules, 0, false);
        assert_eq!(stats.root_value, Some(-99));
        assert_eq!(cache.get(&0), Some(&2));
    }

    #[test]
    fn test_dead_end_scores_utility_sign() {
        // 1 is live but has no moves: utility 1, no depth adjustment
        let rules = FnRules::new(
            |s: &u32| *s == 2,
            |s: &u32| if *s == 1 { 1 } else { 0 },
            |s: &u32| if *s == 0 { vec![1, 2] } else { Vec::new() },
        );
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(1));
        assert_eq!(cache.get(&0), Some(&1));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_dead_end_utility_is_clamped() {
        // Dead ends worth 7 and -7 still score 1 and -1
        let rules = FnRules::new(
            |_: &u32| false,
            |s: &u32| match *s {
                1 => 7,
                2 => -7,
                _ => 0,
            },
            |s: &u32| if *s == 0 { vec![1, 2] } else { Vec::new() },
        );
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(1));
        assert_eq!(cache.get(&0), Some(&1));

        let (stats, cache) = evaluate(&rules, 0, false);
        assert_eq!(stats.root_value, Some(-1));
        assert_eq!(cache.get(&0), Some(&2));
    }

    #[test]
    fn test_real_win_beats_dead_end() {
        let rules = FnRules::new(
            |s: &u32| *s == 2,
            |s: &u32| if *s <= 2 { 1 } else { 0 },
            |s: &u32| if *s == 0 { vec![1, 2] } else { Vec::new() },
        );
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(99));
        assert_eq!(cache.get(&0), Some(&2));
    }

    #[test]
    fn test_cutoff_skips_siblings_and_leaves_bound_uncached() {
        // Max root: child 1 is worth a draw. Under child 2 the minimizer
        // finds a loss for max first, so child 2 is cut off after 5.
        let rules = Graph::new(&[
            (0, None, &[1, 2]),
            (1, Some(0), &[]),
            (2, None, &[5, 6, 7]),
            (5, Some(-1), &[]),
            (6, Some(1), &[]),
            (7, Some(1), &[]),
        ]);
        let (stats, cache) = evaluate(&rules, 0, true);
        assert_eq!(stats.root_value, Some(0));
        assert_eq!(stats.cutoffs, 2);
        assert_eq!(stats.bounded, 1);
        assert_eq!(cache.get(&0), Some(&1));
        // Node 2 only proved "no better than -98"; its choice is not stored
        assert!(!cache.contains(&2));
    }

    #[test]
    fn test_exact_interior_nodes_are_cached() {
        let rules = Graph::new(&[
            (0, None, &[1, 2]),
            (1, None, &[3, 4]),
            (2, None, &[5]),
            (3, Some(1), &[]),
            (4, Some(-1), &[]),
            (5, Some(1), &[]),
        ]);
        let (stats, cache) = evaluate(&rules, 0, true);
        // Node 1 (min) answers with 4; node 2 forces a win
        assert_eq!(stats.root_value, Some(98));
        assert_eq!(cache.get(&0), Some(&2));
        assert_eq!(cache.get(&1), Some(&4));
        assert_eq!(cache.get(&2), Some(&5));
        assert_eq!(stats.cached, 3);
    }
}
