//! Win/block/random move policy.

use super::rules::winner;
use super::types::{Board, Mark};
use rand::Rng;
use tracing::{debug, instrument};

/// Picks the next cell to play for `my_mark`, returned as `(row, col)`.
///
/// Policy, in priority order: take a winning cell if one exists, else occupy
/// a cell that would let the opponent win next, else a uniformly random empty
/// cell. Ties within the first two steps resolve to the first candidate in a
/// row-major scan.
///
/// # Panics
///
/// Panics if the board is full; callers must only ask for a move while the
/// game is still open.
#[instrument(skip(board))]
pub fn next_move(board: &mut Board, my_mark: Mark) -> (usize, usize) {
    if let Some(cell) = line_completing_cell(board, my_mark) {
        debug!(row = cell.0, col = cell.1, "Found winning move");
        return cell;
    }

    if let Some(cell) = line_completing_cell(board, my_mark.opposite()) {
        debug!(row = cell.0, col = cell.1, "Found blocking move");
        return cell;
    }

    if board.is_full() {
        // Unreachable when callers uphold the open-game precondition.
        panic!("next_move called on a full board");
    }

    let mut rng = rand::thread_rng();
    loop {
        let row = rng.gen_range(0..3);
        let col = rng.gen_range(0..3);
        if board.is_empty(row, col) {
            debug!(row, col, "Picked random move");
            return (row, col);
        }
    }
}

/// Finds the first empty cell that completes a line for `mark`, scanning in
/// row-major order.
///
/// Each candidate is provisionally placed, evaluated, and undone before the
/// next is tried; the board is unchanged on return.
fn line_completing_cell(board: &mut Board, mark: Mark) -> Option<(usize, usize)> {
    for row in 0..3 {
        for col in 0..3 {
            if !board.is_empty(row, col) {
                continue;
            }
            board.set(row, col, mark).unwrap();
            let wins = winner(board) == Some(mark);
            board.clear(row, col);
            if wins {
                return Some((row, col));
            }
        }
    }
    None
}
