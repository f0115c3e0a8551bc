//! Engine configuration.

use crate::error::{Error, Result};

/// Default score of an immediate win. Must exceed the longest game.
pub const DEFAULT_WIN_SCORE: i32 = 100;

/// Largest accepted win score. Keeps the `±(win_score + 1)` root window
/// far away from integer overflow.
pub const MAX_WIN_SCORE: i32 = i32::MAX / 4;

/// When the tree builder materializes child nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Expand the whole reachable tree before evaluation starts.
    Eager,
    /// Expand a node the first time the evaluator visits it.
    #[default]
    Lazy,
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tree construction strategy.
    /// Both strategies produce identical moves; eager trades memory for
    /// doing all move generation up front.
    pub expansion: Expansion,

    /// Score of a win at depth 0. A win at depth `d` scores
    /// `win_score - d` and a loss `d - win_score`, so the value must be
    /// larger than the longest possible game (tic-tac-toe needs 10).
    pub win_score: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            expansion: Expansion::Lazy,
            win_score: DEFAULT_WIN_SCORE,
        }
    }
}

impl EngineConfig {
    /// Eager expansion, suited to small fixed games.
    pub fn eager() -> Self {
        Self::default().with_expansion(Expansion::Eager)
    }

    /// Lazy expansion (the default).
    pub fn lazy() -> Self {
        Self::default()
    }

    /// Builder pattern: set the expansion strategy.
    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Builder pattern: set the win score.
    pub fn with_win_score(mut self, win_score: i32) -> Self {
        self.win_score = win_score;
        self
    }

    /// Check that the configuration can be searched with.
    pub fn validate(&self) -> Result<()> {
        if self.win_score < 2 || self.win_score > MAX_WIN_SCORE {
            return Err(Error::InvalidWinScore {
                value: self.win_score,
                max: MAX_WIN_SCORE,
            });
        }
        Ok(())
    }
}
