//! 3D four-in-a-row decision engine
//!
//! An AI engine for 4x4x4 score-four (Qubic): given the current board,
//! the side to move and a wall-clock budget, it picks the column to drop
//! into. The host game loop owns the authoritative board and applies the
//! returned move without validation, so the engine's one hard contract
//! is that the chosen column has room whenever any column does.
//!
//! # Architecture
//!
//! - [`board`]: bitboard cube, gravity-aware drop/undo, the 76-line
//!   catalog and win detection
//! - [`eval`]: heuristic position scoring over the line catalog
//! - [`search`]: negamax alpha-beta with iterative deepening and a
//!   transposition table, plus an MCTS backend and tactical threat scans
//! - [`engine`]: the staged decision policy and the host-facing
//!   [`MoveDecider`] contract
//!
//! # Quick start
//!
//! ```
//! use qubic::{Board, Column, Engine, EngineConfig, Player};
//!
//! let mut engine = Engine::with_config(EngineConfig::for_testing());
//! let mut board = Board::new();
//! board.drop(Column::new(1, 1), Player::One);
//!
//! if let Some(result) = engine.choose_move(&board, Player::Two) {
//!     println!("play ({}, {})", result.best_move.x, result.best_move.y);
//! }
//! ```
//!
//! # Decision priority
//!
//! 1. Immediate winning drop
//! 2. Block of the opponent's immediate win
//! 3. Opening book (central columns, first plies)
//! 4. Double-threat creation
//! 5. Double-threat denial
//! 6. Alpha-beta or MCTS search under the remaining time budget
//! 7. Fixed-priority fallback column

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{board::Grid, Board, Column, Coord, GameResult, Player};
pub use config::{EngineConfig, SearchMode};
pub use engine::{Engine, MoveDecider, MoveResult, SearchType};
pub use error::{BoardError, ConfigError};
pub use eval::evaluate;
pub use search::{MctsSearcher, Searcher};
