//! Search module
//!
//! Contains:
//! - Arena search tree with eager or lazy expansion
//! - Alpha-Beta evaluator with depth-sensitive terminal scoring
//! - Move cache filled as a side effect of evaluation

pub mod alphabeta;
pub mod cache;
pub mod tree;

pub use alphabeta::{terminal_score, BuildStats, Evaluator};
pub use cache::{CacheStats, MoveCache};
pub use tree::{ChildRange, NodeId, SearchNode, SearchTree};
