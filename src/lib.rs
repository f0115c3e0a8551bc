//! Minimax engine for two-player, zero-sum, perfect-information games
//!
//! The engine works on any game that can answer four questions about a
//! position: is it over, how good is it, what can follow it, and (optionally)
//! whose turn is it. Given those, it:
//! - Builds a game tree from a position, eagerly or on demand
//! - Scores it with alpha-beta, preferring faster wins and slower losses
//! - Remembers the best move of every exactly-scored position
//!
//! # Architecture
//!
//! - [`rules`]: The [`Rules`] adapter trait, a closure adapter and tic-tac-toe
//! - [`search`]: Arena search tree, alpha-beta evaluator and move cache
//! - [`engine`]: The [`Engine`] façade answering "best move from here?"
//! - [`board`]: Bitboard tic-tac-toe position
//! - [`config`]: Engine configuration
//! - [`ui`]: egui front end playing tic-tac-toe against the engine
//!
//! # Quick Start
//!
//! ```
//! use minimax::{Board, Engine, Mark, TicTacToe};
//!
//! // O to move, one placement from a row
//! let board = Board::parse("110000000", "000110000", Mark::O).unwrap();
//! let mut engine = Engine::new(TicTacToe::new(Mark::O), &board, true);
//!
//! let reply = engine.solve(&board).unwrap();
//! assert_eq!(board.move_to(&reply).map(|p| p.to_index()), Some(5));
//! ```
//!
//! # Scoring
//!
//! A win at depth `d` scores `win_score - d`, a loss `d - win_score` and a
//! draw 0, so among equally decisive lines the engine picks the quickest win
//! and stretches out a loss.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Mark, Pos, BOARD_SIZE};
pub use config::{EngineConfig, Expansion};
pub use engine::{Engine, MoveResult, MoveSource};
pub use error::{Error, Result};
pub use rules::{FnRules, Rules, TicTacToe};
