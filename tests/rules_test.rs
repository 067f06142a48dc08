//! Tests for the outcome evaluator and mark arithmetic.

use tictactoe_peer::{rules, Board, Mark};

fn board_from(rows: [[Option<Mark>; 3]; 3]) -> Board {
    let mut board = Board::new();
    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(mark) = cell {
                board.set(row, col, *mark).unwrap();
            }
        }
    }
    board
}

#[test]
fn test_opposite_is_involutive() {
    for mark in [Mark::X, Mark::O] {
        assert_eq!(mark.opposite().opposite(), mark);
    }
    assert_eq!(Mark::X.opposite(), Mark::O);
    assert_eq!(Mark::O.opposite(), Mark::X);
}

#[test]
fn test_mark_integer_encoding() {
    assert_eq!(Mark::X.value(), 1);
    assert_eq!(Mark::O.value(), 0);
    assert_eq!(Mark::from_value(0), Mark::O);
    assert_eq!(Mark::from_value(1), Mark::X);
    // Any non-zero value decodes as X, as in the original encoding.
    assert_eq!(Mark::from_value(7), Mark::X);
}

#[test]
fn test_empty_board_has_no_winner() {
    assert_eq!(rules::winner(&Board::new()), None);
}

#[test]
fn test_winner_in_every_row() {
    for row in 0..3 {
        let mut rows = [[None; 3]; 3];
        rows[row] = [Some(Mark::X); 3];
        let board = board_from(rows);
        assert_eq!(rules::winner(&board), Some(Mark::X), "row {row}");
    }
}

#[test]
fn test_winner_in_every_column() {
    for col in 0..3 {
        let mut rows = [[None; 3]; 3];
        for row in rows.iter_mut() {
            row[col] = Some(Mark::O);
        }
        let board = board_from(rows);
        assert_eq!(rules::winner(&board), Some(Mark::O), "column {col}");
    }
}

#[test]
fn test_winner_on_main_diagonal() {
    let board = board_from([
        [Some(Mark::X), None, None],
        [None, Some(Mark::X), None],
        [None, None, Some(Mark::X)],
    ]);
    assert_eq!(rules::winner(&board), Some(Mark::X));
}

#[test]
fn test_winner_on_anti_diagonal() {
    let board = board_from([
        [None, None, Some(Mark::O)],
        [None, Some(Mark::O), None],
        [Some(Mark::O), None, None],
    ]);
    assert_eq!(rules::winner(&board), Some(Mark::O));
}

#[test]
fn test_ongoing_game_has_no_winner() {
    let board = board_from([
        [Some(Mark::X), Some(Mark::O), None],
        [None, Some(Mark::X), None],
        [None, None, None],
    ]);
    assert_eq!(rules::winner(&board), None);
}

#[test]
fn test_tie_reports_no_winner() {
    // Full board, no complete line.
    let board = board_from([
        [Some(Mark::X), Some(Mark::O), Some(Mark::X)],
        [Some(Mark::X), Some(Mark::O), Some(Mark::O)],
        [Some(Mark::O), Some(Mark::X), Some(Mark::X)],
    ]);
    assert!(board.is_full());
    assert_eq!(rules::winner(&board), None);
}

#[test]
fn test_cell_cannot_be_overwritten() {
    let mut board = Board::new();
    board.set(1, 1, Mark::X).unwrap();
    assert!(board.set(1, 1, Mark::O).is_err());
    assert_eq!(board.get(1, 1), Some(Mark::X));
}

#[test]
fn test_out_of_range_set_is_rejected() {
    let mut board = Board::new();
    assert!(board.set(3, 0, Mark::X).is_err());
    assert!(board.set(0, 3, Mark::X).is_err());
    assert_eq!(board.get(3, 0), None);
}
