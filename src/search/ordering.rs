//! Move ordering for alpha-beta pruning efficiency
//!
//! Good ordering is where alpha-beta earns its keep: trying the likely
//! best column first makes later siblings cut off early. Ordering is a
//! heuristic only: it reorders the legal columns but never drops one.

use crate::board::{Board, Column, Player};
use crate::eval::evaluate;

/// Legal columns, central ones first, then by increasing distance from
/// the central axis.
#[must_use]
pub fn ordered_columns(board: &Board) -> Vec<Column> {
    let mut columns: Vec<Column> = board.legal_columns().collect();
    columns.sort_by_key(|c| c.centrality());
    columns
}

/// Legal columns ranked by a one-ply evaluation probe for the given
/// player, best first. Centrality breaks ties, which keeps the ordering
/// stable on quiet boards.
#[must_use]
pub fn ordered_columns_scored(board: &Board, player: Player) -> Vec<Column> {
    let mut work = board.clone();
    let mut scored: Vec<(i32, Column)> = board
        .legal_columns()
        .map(|column| {
            let z = work.drop(column, player);
            let score = evaluate(&work, player);
            work.undo(column, z);
            (score, column)
        })
        .collect();
    scored.sort_by_key(|&(score, column)| (-score, column.centrality()));
    scored.into_iter().map(|(_, column)| column).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_center_columns_come_first() {
        let board = Board::new();
        let ordered = ordered_columns(&board);
        assert_eq!(ordered.len(), 16);
        for column in &ordered[..4] {
            assert!(column.is_central(), "expected central column, got {:?}", column);
        }
    }

    #[test]
    fn test_ordering_never_drops_a_legal_column() {
        let mut board = Board::new();
        // Fill two columns completely
        for _ in 0..4 {
            board.drop(Column::new(0, 0), Player::One);
            board.drop(Column::new(3, 3), Player::Two);
        }

        let plain: HashSet<Column> = ordered_columns(&board).into_iter().collect();
        let scored: HashSet<Column> = ordered_columns_scored(&board, Player::One)
            .into_iter()
            .collect();
        let legal: HashSet<Column> = board.legal_columns().collect();

        assert_eq!(plain, legal);
        assert_eq!(scored, legal);
        assert_eq!(legal.len(), 14);
    }

    #[test]
    fn test_scored_ordering_prefers_the_stronger_move() {
        let mut board = Board::new();
        // Player One has two on the x axis; extending it should rank
        // ahead of a far corner.
        board.drop(Column::new(0, 0), Player::One);
        board.drop(Column::new(1, 0), Player::One);

        let ordered = ordered_columns_scored(&board, Player::One);
        let extend = ordered
            .iter()
            .position(|&c| c == Column::new(2, 0))
            .expect("legal column missing");
        let corner = ordered
            .iter()
            .position(|&c| c == Column::new(3, 3))
            .expect("legal column missing");
        assert!(extend < corner);
    }

    #[test]
    fn test_scored_ordering_leaves_board_unchanged() {
        let mut board = Board::new();
        board.drop(Column::new(2, 1), Player::Two);
        let snapshot = board.clone();
        let _ = ordered_columns_scored(&board, Player::One);
        assert_eq!(board, snapshot);
    }
}
