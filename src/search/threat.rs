//! Immediate-win and double-threat detection
//!
//! These are the cheap tactical scans the decision policy runs before
//! committing to a full search: can somebody win right now, and can a
//! single drop create two winning replies at once. The double-threat
//! detector is a heuristic pattern check, not a proof procedure: a
//! position can hide forced wins it does not see.

use crate::board::{Board, Column, GameResult, Player};
use crate::search::ordering::ordered_columns;

/// A column that wins the game for `player` immediately, if one exists.
/// Central columns are tried first so ties resolve toward the center.
#[must_use]
pub fn winning_column(board: &Board, player: Player) -> Option<Column> {
    let mut work = board.clone();
    for column in ordered_columns(board) {
        let z = work.drop(column, player);
        let won = work.result() == Some(GameResult::Won(player));
        work.undo(column, z);
        if won {
            return Some(column);
        }
    }
    None
}

/// Every column that wins immediately for `player`.
#[must_use]
pub fn winning_columns(board: &Board, player: Player) -> Vec<Column> {
    let mut work = board.clone();
    let mut wins = Vec::new();
    for column in board.legal_columns() {
        let z = work.drop(column, player);
        if work.result() == Some(GameResult::Won(player)) {
            wins.push(column);
        }
        work.undo(column, z);
    }
    wins
}

/// A drop that leaves `player` with two or more distinct winning columns
/// while handing the opponent no immediate win of their own. The
/// opponent can block at most one of the two, so the threat converts
/// next turn.
#[must_use]
pub fn double_threat(board: &Board, player: Player) -> Option<Column> {
    let opponent = player.opponent();
    let mut work = board.clone();
    for column in ordered_columns(board) {
        let z = work.drop(column, player);
        let is_fork = work.result().is_none()
            && winning_columns(&work, player).len() >= 2
            && winning_column(&work, opponent).is_none();
        work.undo(column, z);
        if is_fork {
            return Some(column);
        }
    }
    None
}
