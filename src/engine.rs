//! Main engine integrating tree building, evaluation and the move cache
//!
//! The engine searches once when it is created and keeps the chosen move of
//! every exactly-evaluated position it saw. [`Engine::solve`] answers from
//! that cache and, on a miss, searches again from the queried position:
//!
//! 1. **Game over**: terminal positions have no move
//! 2. **Cache hit**: the stored successor
//! 3. **Rebuild**: a fresh tree rooted at the position, merged into the cache
//!
//! # Example
//!
//! ```
//! use minimax::board::{Board, Mark};
//! use minimax::rules::TicTacToe;
//! use minimax::Engine;
//!
//! // O moves first and is the maximizing side
//! let start = Board::with_first_mover(Mark::O);
//! let mut engine = Engine::new(TicTacToe::new(Mark::O), &start, true);
//!
//! let reply = engine.solve(&start).expect("empty board has moves");
//! assert_eq!(reply.mark_count(), 1);
//! ```
//!
//! # Sharing
//!
//! `solve` takes `&mut self` because a miss mutates the cache. To use one
//! engine from several threads, wrap it in a `Mutex`, or give each thread
//! its own engine.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::rules::{FnRules, Rules};
use crate::search::{BuildStats, Evaluator, MoveCache, SearchTree};

/// How a [`MoveResult`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// The queried position is terminal
    GameOver,
    /// Answered from the move cache
    Cached,
    /// Cache miss answered by a fresh search rooted at the position
    Rebuilt,
    /// Live position with no successors; there is no move to make
    DeadEnd,
}

/// Result of a move query with diagnostics.
#[derive(Debug, Clone)]
pub struct MoveResult<S> {
    /// Chosen successor state, if any
    pub best_move: Option<S>,
    /// Where the answer came from
    pub source: MoveSource,
    /// Statistics of the rebuild, when one was needed
    pub build: Option<BuildStats>,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl<S> MoveResult<S> {
    #[inline]
    fn game_over(time_ms: u64) -> Self {
        Self {
            best_move: None,
            source: MoveSource::GameOver,
            build: None,
            time_ms,
        }
    }

    #[inline]
    fn cached(next: S, time_ms: u64) -> Self {
        Self {
            best_move: Some(next),
            source: MoveSource::Cached,
            build: None,
            time_ms,
        }
    }

    #[inline]
    fn rebuilt(next: Option<S>, build: Option<BuildStats>, time_ms: u64) -> Self {
        let source = if next.is_some() {
            MoveSource::Rebuilt
        } else {
            MoveSource::DeadEnd
        };
        Self {
            best_move: next,
            source,
            build,
            time_ms,
        }
    }
}

/// Minimax engine with a memoized move cache.
///
/// Generic over the [`Rules`] adapter; the engine owns the rules so that it
/// can search again from any position it is asked about.
///
/// A search from a position needs to know whether the side to move there
/// maximizes. The engine asks [`Rules::maximizer_to_move`] first, then the
/// roles it has recorded for positions it has seen, and finally the role
/// implied by alternating turns from the initial position.
pub struct Engine<R: Rules> {
    rules: R,
    config: EngineConfig,
    initial: R::State,
    maximizing_at_root: bool,
    cache: MoveCache<R::State>,
    // Role of the side to move, for rules that give no hint
    roles: HashMap<R::State, bool>,
    roles_walked: bool,
    rebuilds: u64,
    last_build: Option<BuildStats>,
}

impl<R: Rules> Engine<R> {
    /// Create an engine with the default configuration and search from
    /// `initial`, where the side to move maximizes iff `maximizing_at_root`.
    #[must_use]
    pub fn new(rules: R, initial: &R::State, maximizing_at_root: bool) -> Self {
        let mut engine = Self::unbuilt(rules, EngineConfig::default(), initial, maximizing_at_root);
        engine.build_from(initial, maximizing_at_root);
        engine
    }

    /// Create an engine with a custom configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_config(
        rules: R,
        initial: &R::State,
        maximizing_at_root: bool,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::unbuilt(rules, config, initial, maximizing_at_root);
        engine.build_from(initial, maximizing_at_root);
        Ok(engine)
    }

    fn unbuilt(rules: R, config: EngineConfig, initial: &R::State, maximizing_at_root: bool) -> Self {
        Self {
            rules,
            config,
            initial: initial.clone(),
            maximizing_at_root,
            cache: MoveCache::new(),
            roles: HashMap::new(),
            roles_walked: false,
            rebuilds: 0,
            last_build: None,
        }
    }

    /// Best successor of `state`, or `None` if the game is over.
    ///
    /// Searches at most once: after a rebuild rooted at `state` the cache
    /// always holds its move, unless the rules give a live position no
    /// successors at all.
    pub fn solve(&mut self, state: &R::State) -> Option<R::State> {
        self.solve_with_stats(state).best_move
    }

    /// Best successor of `state` along with how it was found.
    pub fn solve_with_stats(&mut self, state: &R::State) -> MoveResult<R::State> {
        let start = Instant::now();

        if self.rules.is_terminal(state) {
            return MoveResult::game_over(start.elapsed().as_millis() as u64);
        }

        if let Some(next) = self.cache.lookup(state) {
            let next = next.clone();
            return MoveResult::cached(next, start.elapsed().as_millis() as u64);
        }

        // Pruned past, or never reached from an earlier root
        let maximizing = self.role_of(state);
        debug!(maximizing, cached = self.cache.len(), "move cache miss, rebuilding");

        let build = self.build_from(state, maximizing);
        self.rebuilds += 1;

        let next = self.cache.lookup(state).cloned();
        if next.is_none() {
            debug!("position has no successors");
        }
        MoveResult::rebuilt(next, build, start.elapsed().as_millis() as u64)
    }

    /// Whether the side to move in `state` maximizes.
    fn role_of(&mut self, state: &R::State) -> bool {
        if let Some(maximizing) = self.rules.maximizer_to_move(state) {
            return maximizing;
        }
        if !self.roles.contains_key(state) {
            self.walk_roles();
        }
        match self.roles.get(state) {
            Some(&maximizing) => maximizing,
            None => {
                warn!("no role known for position, assuming the initial side's");
                self.maximizing_at_root
            }
        }
    }

    /// Assign alternating roles to every position reachable from the
    /// initial one. Runs at most once per engine.
    fn walk_roles(&mut self) {
        if self.roles_walked {
            return;
        }
        self.roles_walked = true;

        let mut seen = HashSet::new();
        let mut frontier = VecDeque::from([(self.initial.clone(), self.maximizing_at_root)]);
        while let Some((state, maximizing)) = frontier.pop_front() {
            if !seen.insert(state.clone()) {
                continue;
            }
            if !self.rules.is_terminal(&state) {
                for next in self.rules.successors(&state) {
                    frontier.push_back((next, !maximizing));
                }
            }
            self.roles.entry(state).or_insert(maximizing);
        }
        debug!(positions = seen.len(), roles = self.roles.len(), "roles assigned from the initial position");
    }

    /// Build and evaluate one tree rooted at `root`, merging its moves into
    /// the cache. Terminal roots are not searched.
    fn build_from(&mut self, root: &R::State, maximizing: bool) -> Option<BuildStats> {
        if self.rules.is_terminal(root) {
            return None;
        }

        let start = Instant::now();
        let mut tree = SearchTree::build(&self.rules, root.clone(), maximizing, self.config.expansion);
        let mut fresh = MoveCache::new();
        let mut stats = Evaluator::new(&self.rules, &mut fresh, self.config.win_score).evaluate(&mut tree);
        stats.elapsed = start.elapsed();

        if self.rules.maximizer_to_move(root).is_none() {
            for node in tree.nodes() {
                self.roles.entry(node.state.clone()).or_insert(node.maximizing);
            }
        }
        drop(tree);

        let added = self.cache.merge(fresh);
        debug!(
            expansion = ?self.config.expansion,
            nodes = stats.nodes,
            evaluated = stats.evaluated,
            cutoffs = stats.cutoffs,
            cached = stats.cached,
            added,
            root_value = ?stats.root_value,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "search tree built"
        );

        self.last_build = Some(stats.clone());
        Some(stats)
    }

    /// Positions reached by letting the engine move for both sides from
    /// `state` until the game ends. Stops early if a position repeats.
    pub fn principal_line(&mut self, state: &R::State) -> Vec<R::State> {
        let mut line = Vec::new();
        let mut seen: HashSet<R::State> = HashSet::new();
        seen.insert(state.clone());

        let mut current = state.clone();
        while let Some(next) = self.solve(&current) {
            if !seen.insert(next.clone()) {
                break;
            }
            line.push(next.clone());
            current = next;
        }
        line
    }

    /// The rules adapter
    #[inline]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Current configuration
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Role of the side to move at the initial position
    #[inline]
    pub fn maximizing_at_root(&self) -> bool {
        self.maximizing_at_root
    }

    /// The move cache
    #[inline]
    pub fn cache(&self) -> &MoveCache<R::State> {
        &self.cache
    }

    /// Number of searches triggered by cache misses
    #[inline]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Statistics of the most recent search, if any
    #[inline]
    pub fn last_build(&self) -> Option<&BuildStats> {
        self.last_build.as_ref()
    }
}

impl<S, T, U, G> Engine<FnRules<S, T, U, G>>
where
    S: Clone + Eq + Hash,
    T: Fn(&S) -> bool,
    U: Fn(&S) -> i32,
    G: Fn(&S) -> Vec<S>,
{
    /// Create an engine from the three rule functions.
    ///
    /// Closures cannot say whose turn it is, so the engine infers it by
    /// alternating roles from `initial`. Positions that cannot be reached
    /// from `initial` are searched as if the initial side were to move; use
    /// a [`Rules`] type with [`Rules::maximizer_to_move`] for those.
    ///
    /// ```
    /// use minimax::Engine;
    ///
    /// // Count up by one or two; reaching 4 wins for whoever moved there.
    /// let mut engine = Engine::make(
    ///     (0u8, true),
    ///     |s: &(u8, bool)| s.0 >= 4,
    ///     |s: &(u8, bool)| if s.1 { -1 } else { 1 },
    ///     |s: &(u8, bool)| vec![(s.0 + 1, !s.1), (s.0 + 2, !s.1)],
    ///     true,
    /// );
    /// // From 2 the maximizer jumps straight to 4
    /// assert_eq!(engine.solve(&(2, true)), Some((4, false)));
    /// ```
    #[must_use]
    pub fn make(initial: S, is_terminal: T, utility: U, successors: G, maximizing_at_root: bool) -> Self {
        Self::new(
            FnRules::new(is_terminal, utility, successors),
            &initial,
            maximizing_at_root,
        )
    }
}
