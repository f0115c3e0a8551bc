//! Error types for the minimax crate
//!
//! The search itself never fails: terminal positions and dead ends are
//! ordinary outcomes of [`Engine::solve`](crate::Engine::solve). Errors only
//! come from configuration and from the bundled tic-tac-toe adapter.

use thiserror::Error;

/// Main error type for the minimax crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("win score {value} must be at least 2 and below {max}")]
    InvalidWinScore { value: i32, max: i32 },

    #[error("invalid board string '{input}': {reason}")]
    InvalidBoardString { input: String, reason: String },

    #[error("X and O both occupy cells {overlap:#011b}")]
    OverlappingMarks { overlap: u16 },

    #[error("invalid piece counts: X={x_count}, O={o_count} with {to_move} to move")]
    InvalidPieceCounts {
        x_count: u32,
        o_count: u32,
        to_move: char,
    },

    #[error("position {index} is out of bounds (must be 0-8)")]
    InvalidPosition { index: usize },

    #[error("cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("{role} must be X or O, not an empty mark")]
    EmptyMark { role: &'static str },

    #[error("game already over")]
    GameOver,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
