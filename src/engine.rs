//! Decision engine integrating the tactical scans and search backends
//!
//! The engine answers one question per turn: which column to drop into.
//! It works through a fixed priority ladder, each stage either producing
//! a move or falling through to the next:
//!
//! 1. **Immediate win**: a drop that completes four-in-a-row now
//! 2. **Block**: deny the opponent's immediate win
//! 3. **Opening book**: central columns for the first plies
//! 4. **Double threat**: a drop creating two winning replies at once
//! 5. **Block double threat**: occupy the opponent's forking column
//! 6. **Search**: negamax alpha-beta or MCTS under the time budget
//! 7. **Fallback**: first open column of a fixed priority list
//!
//! Stage 7 cannot fail while any column has room, so `decide` always
//! returns a playable column; the host applies it unvalidated.
//!
//! # Example
//!
//! ```
//! use qubic::{Board, Column, Engine, EngineConfig, Player};
//!
//! let mut engine = Engine::with_config(EngineConfig::for_testing());
//! let mut board = Board::new();
//! board.drop(Column::new(1, 1), Player::One);
//!
//! let result = engine.choose_move(&board, Player::Two).unwrap();
//! assert!(board.has_room(result.best_move));
//! ```

use std::time::{Duration, Instant};

use crate::board::{board::Grid, Board, Column, Player};
use crate::config::{EngineConfig, SearchMode};
use crate::search::{double_threat, winning_column, MctsSearcher, Searcher};

/// Which stage of the priority ladder produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    ImmediateWin,
    Block,
    Opening,
    DoubleThreat,
    BlockDoubleThreat,
    AlphaBeta,
    Mcts,
    Fallback,
}

/// A chosen move with search statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Column,
    /// Evaluation score where the producing stage has one, 0 otherwise
    pub score: i32,
    pub search_type: SearchType,
    pub time_ms: u64,
    pub nodes: u64,
}

impl MoveResult {
    fn tactical(best_move: Column, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move,
            score,
            search_type,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 0,
        }
    }
}

/// Host-facing capability: one call per turn, a column in reply.
///
/// `grid` is indexed `[z][y][x]` with 0 = empty, 1, 2; `last_move` is
/// the opponent's latest coordinate, absent on the first move. The
/// returned `(x, y)` always has room whenever any column does; the host
/// applies it without validation.
pub trait MoveDecider {
    fn decide(&mut self, grid: &Grid, player: u8, last_move: Option<(u8, u8, u8)>) -> (u8, u8);
}

/// Fallback priority: central columns, then corners, then the remaining
/// edge columns.
const FALLBACK_PRIORITY: [(u8, u8); 16] = [
    (1, 1),
    (2, 2),
    (2, 1),
    (1, 2),
    (0, 0),
    (3, 0),
    (0, 3),
    (3, 3),
    (1, 0),
    (2, 0),
    (0, 1),
    (3, 1),
    (0, 2),
    (3, 2),
    (1, 3),
    (2, 3),
];

/// The decision engine. Holds the searcher (and with it the process-wide
/// transposition table) across turns; MCTS trees are per-decision.
pub struct Engine {
    config: EngineConfig,
    searcher: Searcher,
    mcts: MctsSearcher,
}

impl Engine {
    /// Engine with default configuration: alpha-beta mode, 500 ms budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let searcher = Searcher::new(config.tt_capacity);
        let mcts = MctsSearcher::new(config.exploration, config.seed);
        Self {
            config,
            searcher,
            mcts,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drop cached search state. Call between games.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_cache();
    }

    /// Work through the priority ladder. Returns `None` only for a
    /// completely full board, where no move exists and the host contract
    /// is void.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<MoveResult> {
        let start = Instant::now();
        let budget = Duration::from_millis(self.config.time_budget_ms);
        let opponent = player.opponent();

        if board.is_full() {
            return None;
        }

        // 1. Take an immediate win
        if let Some(column) = winning_column(board, player) {
            tracing::debug!(?column, "immediate win");
            return Some(MoveResult::tactical(
                column,
                crate::eval::LineScore::WIN,
                SearchType::ImmediateWin,
                start,
            ));
        }

        // 2. Block the opponent's immediate win
        if let Some(column) = winning_column(board, opponent) {
            tracing::debug!(?column, "blocking opponent win");
            return Some(MoveResult::tactical(column, 0, SearchType::Block, start));
        }

        // 3. Opening book for the first plies
        if let Some(column) = self.opening_move(board) {
            tracing::debug!(?column, "opening book");
            return Some(MoveResult::tactical(column, 0, SearchType::Opening, start));
        }

        // 4. Create a double threat
        if let Some(column) = double_threat(board, player) {
            tracing::debug!(?column, "creating double threat");
            return Some(MoveResult::tactical(
                column,
                0,
                SearchType::DoubleThreat,
                start,
            ));
        }

        // 5. Deny the opponent's double threat by taking its column
        if let Some(column) = double_threat(board, opponent) {
            if board.has_room(column) {
                tracing::debug!(?column, "blocking double threat");
                return Some(MoveResult::tactical(
                    column,
                    0,
                    SearchType::BlockDoubleThreat,
                    start,
                ));
            }
        }

        // 6. Full search under whatever budget the tactical stages left
        let remaining = budget.saturating_sub(start.elapsed());
        let searched = match self.config.mode {
            SearchMode::AlphaBeta => {
                let result = self
                    .searcher
                    .search(board, player, self.config.max_depth, remaining);
                result.best_move.map(|column| MoveResult {
                    best_move: column,
                    score: result.score,
                    search_type: SearchType::AlphaBeta,
                    time_ms: start.elapsed().as_millis() as u64,
                    nodes: result.nodes,
                })
            }
            SearchMode::Mcts => {
                let result = self.mcts.search(board, player, remaining);
                result.best_move.map(|column| MoveResult {
                    best_move: column,
                    score: 0,
                    search_type: SearchType::Mcts,
                    time_ms: start.elapsed().as_millis() as u64,
                    nodes: result.iterations,
                })
            }
        };
        if let Some(result) = searched {
            if board.has_room(result.best_move) {
                return Some(result);
            }
            // A search handing back an unplayable column is an internal
            // anomaly; the fallback stage absorbs it.
            tracing::warn!(?result.best_move, "search returned a full column");
        }

        // 7. Guaranteed fallback
        let column = fallback_column(board)?;
        tracing::debug!(?column, "fallback move");
        Some(MoveResult::tactical(column, 0, SearchType::Fallback, start))
    }

    /// Book move: while the board has fewer pieces than the configured
    /// threshold, take the first central column with room.
    fn opening_move(&self, board: &Board) -> Option<Column> {
        if !self.config.opening_book || board.move_count() >= self.config.opening_plies {
            return None;
        }
        Column::CENTRAL.into_iter().find(|&c| board.has_room(c))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveDecider for Engine {
    fn decide(&mut self, grid: &Grid, player: u8, last_move: Option<(u8, u8, u8)>) -> (u8, u8) {
        let player = Player::from_cell(player).unwrap_or(Player::One);
        tracing::debug!(?last_move, cell = player.to_cell(), "decide called");

        let board = match Board::from_grid(grid) {
            Ok(board) => board,
            Err(err) => {
                // Malformed input degrades to a defensive scan of the raw
                // grid, never to a fault surfaced at the host.
                tracing::warn!(%err, "malformed host grid, using fallback");
                return fallback_from_grid(grid);
            }
        };

        match self.choose_move(&board, player) {
            Some(result) => {
                tracing::debug!(
                    column = ?result.best_move,
                    stage = ?result.search_type,
                    time_ms = result.time_ms,
                    "move chosen"
                );
                (result.best_move.x, result.best_move.y)
            }
            // Full board: the contract is void, answer something shaped
            // like a column rather than panicking inside the host.
            None => (0, 0),
        }
    }
}

/// First fallback-priority column with room.
fn fallback_column(board: &Board) -> Option<Column> {
    FALLBACK_PRIORITY
        .into_iter()
        .map(|(x, y)| Column::new(x, y))
        .find(|&c| board.has_room(c))
}

/// Defensive fallback straight off the raw grid: the first priority
/// column whose top cell reads empty.
fn fallback_from_grid(grid: &Grid) -> (u8, u8) {
    FALLBACK_PRIORITY
        .into_iter()
        .find(|&(x, y)| grid[3][y as usize][x as usize] == 0)
        .unwrap_or((0, 0))
}
