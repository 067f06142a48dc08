//! Outcome evaluation over a board.

use super::types::{Board, Mark};

/// Returns the mark occupying the first complete line found, if any.
///
/// Checks all three rows, then all three columns, then both diagonals. A tie
/// and an ongoing game both report `None`; callers distinguish them with
/// [`Board::is_full`].
pub fn winner(board: &Board) -> Option<Mark> {
    // Lines as (row, col) triples: rows, columns, diagonals, in check order.
    const LINES: [[(usize, usize); 3]; 8] = [
        [(0, 0), (0, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2)],
        [(2, 0), (2, 1), (2, 2)],
        [(0, 0), (1, 0), (2, 0)],
        [(0, 1), (1, 1), (2, 1)],
        [(0, 2), (1, 2), (2, 2)],
        [(0, 0), (1, 1), (2, 2)],
        [(0, 2), (1, 1), (2, 0)],
    ];

    for line in &LINES {
        let [a, b, c] = line;
        if let Some(mark) = board.get(a.0, a.1) {
            if board.get(b.0, b.1) == Some(mark) && board.get(c.0, c.1) == Some(mark) {
                return Some(mark);
            }
        }
    }

    None
}
