//! Board-level integration tests

use super::board::Grid;
use super::*;
use crate::error::BoardError;

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert!(board.is_empty());
    assert_eq!(board.move_count(), 0);
    assert_eq!(board.legal_columns().count(), 16);
    assert_eq!(board.result(), None);
}

#[test]
fn test_drop_lands_at_lowest_empty_cell() {
    let mut board = Board::new();
    let column = Column::new(2, 3);
    assert_eq!(board.drop(column, Player::One), 0);
    assert_eq!(board.drop(column, Player::Two), 1);
    assert_eq!(board.column_height(column), 2);
    assert_eq!(board.get(Coord::new(2, 3, 0)), Some(Player::One));
    assert_eq!(board.get(Coord::new(2, 3, 1)), Some(Player::Two));
    assert_eq!(board.get(Coord::new(2, 3, 2)), None);
}

#[test]
fn test_drop_undo_roundtrip() {
    let mut board = Board::new();
    board.drop(Column::new(1, 1), Player::One);
    board.drop(Column::new(2, 2), Player::Two);
    let snapshot = board.clone();

    let column = Column::new(1, 1);
    let z = board.drop(column, Player::Two);
    assert_ne!(board, snapshot);
    board.undo(column, z);
    assert_eq!(board, snapshot);
}

#[test]
fn test_column_fills_and_reports_full() {
    let mut board = Board::new();
    let column = Column::new(0, 2);
    // Heights 0-2 filled [1, 2, 1], height 3 still open
    board.drop(column, Player::One);
    board.drop(column, Player::Two);
    board.drop(column, Player::One);
    assert_eq!(board.drop_height(0, 2), Some(3));

    board.drop(column, Player::Two);
    assert_eq!(board.drop_height(0, 2), None);
    assert!(!board.has_room(column));
}

#[test]
fn test_drop_height_fails_closed_out_of_range() {
    let board = Board::new();
    assert_eq!(board.drop_height(-1, 0), None);
    assert_eq!(board.drop_height(0, 4), None);
    assert_eq!(board.drop_height(17, -3), None);
}

#[test]
fn test_vertical_win_detected() {
    let mut board = Board::new();
    let column = Column::new(3, 3);
    for _ in 0..3 {
        board.drop(column, Player::Two);
        assert_eq!(board.result(), None);
    }
    board.drop(column, Player::Two);
    assert_eq!(board.result(), Some(GameResult::Won(Player::Two)));
}

#[test]
fn test_space_diagonal_win_detected() {
    let mut board = Board::new();
    // Build supports so Player One's diagonal (i, i, i) is droppable
    for (column, rises) in [
        (Column::new(1, 1), 1),
        (Column::new(2, 2), 2),
        (Column::new(3, 3), 3),
    ] {
        for _ in 0..rises {
            board.drop(column, Player::Two);
        }
    }
    for i in 0..4u8 {
        assert_eq!(board.result(), None);
        board.drop(Column::new(i, i), Player::One);
    }
    assert_eq!(board.result(), Some(GameResult::Won(Player::One)));
}

#[test]
fn test_win_detection_is_owner_agnostic() {
    // Any line fully held by one nonzero value is a win for that value,
    // whichever player number it is.
    for player in [Player::One, Player::Two] {
        let mut board = Board::new();
        for x in 0..4u8 {
            board.drop(Column::new(x, 0), player);
        }
        assert_eq!(board.result(), Some(GameResult::Won(player)));
    }
}

#[test]
fn test_from_grid_roundtrip() {
    let mut grid: Grid = [[[0; 4]; 4]; 4];
    grid[0][0][0] = 1;
    grid[1][0][0] = 2;
    grid[0][2][1] = 2;

    let board = Board::from_grid(&grid).unwrap();
    assert_eq!(board.move_count(), 3);
    assert_eq!(board.get(Coord::new(0, 0, 0)), Some(Player::One));
    assert_eq!(board.get(Coord::new(0, 0, 1)), Some(Player::Two));
    assert_eq!(board.get(Coord::new(1, 2, 0)), Some(Player::Two));
    assert_eq!(board.drop_height(0, 0), Some(2));
}

#[test]
fn test_from_grid_rejects_bad_cell_value() {
    let mut grid: Grid = [[[0; 4]; 4]; 4];
    grid[0][1][1] = 3;
    assert!(matches!(
        Board::from_grid(&grid),
        Err(BoardError::InvalidCell { value: 3, .. })
    ));
}

#[test]
fn test_from_grid_rejects_floating_piece() {
    let mut grid: Grid = [[[0; 4]; 4]; 4];
    grid[2][1][1] = 1; // nothing underneath at z=0,1
    assert!(matches!(
        Board::from_grid(&grid),
        Err(BoardError::FloatingPiece { x: 1, y: 1, z: 2 })
    ));
}

#[test]
fn test_full_board_has_no_legal_columns() {
    let mut board = Board::new();
    let mut player = Player::One;
    for column in Column::all() {
        for _ in 0..4 {
            board.drop(column, player);
            player = player.opponent();
        }
    }
    assert!(board.is_full());
    assert_eq!(board.legal_columns().count(), 0);
    assert!(board.result().is_some());
}

#[test]
fn test_centrality_ranks_center_before_corner() {
    assert!(Column::new(1, 1).centrality() < Column::new(0, 0).centrality());
    assert!(Column::new(2, 1).is_central());
    assert!(!Column::new(3, 1).is_central());
    assert_eq!(Column::CENTRAL.len(), 4);
}

#[test]
fn test_coord_bit_index_roundtrip() {
    for idx in 0..TOTAL_CELLS {
        let coord = Coord::from_bit_index(idx);
        assert_eq!(coord.bit_index(), idx);
    }
}
