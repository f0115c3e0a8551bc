//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by [`NodeId`]
//! indices. A node's children are always allocated together, so they
//! occupy one [`ChildRange`]. The tree is strictly top-down: no node knows
//! its parent, and a tree lives for exactly one build.

use crate::config::Expansion;
use crate::rules::Rules;

/// Index of a node in the arena. A tree holds at most `u32::MAX` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contiguous block of sibling nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRange {
    start: u32,
    len: u32,
}

impl ChildRange {
    pub const EMPTY: ChildRange = ChildRange { start: 0, len: 0 };

    /// Range of `len` nodes allocated from arena index `start`.
    ///
    /// # Panics
    ///
    /// If the range ends past `u32::MAX`.
    fn new(start: usize, len: usize) -> Self {
        let end = start.checked_add(len).and_then(|end| u32::try_from(end).ok());
        match (u32::try_from(start), end) {
            (Ok(start), Some(end)) => Self { start, len: end - start },
            _ => panic!("search tree exceeds {} nodes", u32::MAX),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Child ids in the order the rules generated them
    pub fn iter(&self) -> impl Iterator<Item = NodeId> {
        (self.start..self.start + self.len).map(NodeId)
    }
}

/// One position under exploration.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// Position this node stands for
    pub state: S,
    /// Plies from the root
    pub depth: u32,
    /// True if the side to move maximizes
    pub maximizing: bool,
    /// Terminal according to the rules, computed when the node is allocated
    pub terminal: bool,
    /// Lower bound of the window inherited from the parent
    pub alpha: i32,
    /// Upper bound of the window inherited from the parent
    pub beta: i32,
    /// Set once, when the evaluator visits the node
    pub value: Option<i32>,
    /// Child realizing `value`; None for leaves
    pub best_child: Option<NodeId>,
    /// None until expanded
    pub children: Option<ChildRange>,
}

impl<S> SearchNode<S> {
    fn new(state: S, depth: u32, maximizing: bool, terminal: bool) -> Self {
        Self {
            state,
            depth,
            maximizing,
            terminal,
            alpha: i32::MIN,
            beta: i32::MAX,
            value: None,
            best_child: None,
            children: None,
        }
    }

    /// Check if the node's children have been materialized
    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }
}

/// Arena-backed search tree rooted at `NodeId(0)`.
#[derive(Debug)]
pub struct SearchTree<S> {
    nodes: Vec<SearchNode<S>>,
    expansions: u64,
}

impl<S: Clone> SearchTree<S> {
    /// Create a tree holding only the root.
    pub fn new<R: Rules<State = S>>(rules: &R, root: S, maximizing: bool) -> Self {
        let terminal = rules.is_terminal(&root);
        Self {
            nodes: vec![SearchNode::new(root, 0, maximizing, terminal)],
            expansions: 0,
        }
    }

    /// Create a tree and expand it according to `expansion`.
    pub fn build<R: Rules<State = S>>(
        rules: &R,
        root: S,
        maximizing: bool,
        expansion: Expansion,
    ) -> Self {
        let mut tree = Self::new(rules, root, maximizing);
        if expansion == Expansion::Eager {
            tree.expand_all(rules);
        }
        tree
    }

    /// Root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Number of allocated nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes expanded so far, including those with no children.
    #[inline]
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Materialize the children of `id` from the rules' successor list.
    ///
    /// Each child gets `depth + 1` and the opposite role. Expanding a node
    /// twice is a no-op and returns the existing range. Terminal nodes are
    /// never expanded.
    ///
    /// # Panics
    ///
    /// If the arena would grow past `u32::MAX` nodes.
    pub fn expand<R: Rules<State = S>>(&mut self, rules: &R, id: NodeId) -> ChildRange {
        let node = self.get(id);
        if let Some(children) = node.children {
            return children;
        }
        if node.terminal {
            return ChildRange::EMPTY;
        }

        let depth = node.depth + 1;
        let maximizing = !node.maximizing;
        let successors = rules.successors(&node.state);

        let range = ChildRange::new(self.nodes.len(), successors.len());
        self.nodes.reserve(successors.len());
        for state in successors {
            let terminal = rules.is_terminal(&state);
            self.nodes.push(SearchNode::new(state, depth, maximizing, terminal));
        }

        self.expansions += 1;
        self.get_mut(id).children = Some(range);
        range
    }

    /// All allocated nodes in allocation order
    pub fn nodes(&self) -> impl Iterator<Item = &SearchNode<S>> {
        self.nodes.iter()
    }

    /// Expand every reachable non-terminal node.
    ///
    /// Walks the arena in allocation order, which is breadth-first, so no
    /// recursion is needed and sibling ranges stay contiguous.
    pub fn expand_all<R: Rules<State = S>>(&mut self, rules: &R) {
        let mut next = 0;
        while next < self.nodes.len() {
            self.expand(rules, NodeId(next as u32));
            next += 1;
        }
    }
}
