//! Core domain types shared between the game logic and the wire protocol.

use serde::{Deserialize, Serialize};

/// The mark a player plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Mark X (integer encoding 1).
    X,
    /// Mark O (integer encoding 0).
    O,
}

impl Mark {
    /// Returns the opposite mark.
    pub fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Stable integer encoding of the mark (X = 1, O = 0).
    pub fn value(self) -> u8 {
        match self {
            Mark::X => 1,
            Mark::O => 0,
        }
    }

    /// Decodes a mark from its integer encoding; any non-zero value reads as X.
    pub fn from_value(value: u8) -> Self {
        if value == 0 { Mark::O } else { Mark::X }
    }
}

/// A participant in a game, identified across processes by an opaque id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier of the owning process.
    pub id: String,
    /// Which mark this player plays with.
    pub mark: Mark,
}

/// 3x3 tic-tac-toe board. A cell holds `None` until played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells indexed `[row][col]`, rows and columns 0-2.
    cells: [[Option<Mark>; 3]; 3],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given coordinates, or `None` out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        *self.cells.get(row)?.get(col)?
    }

    /// Places a mark at the given cell.
    ///
    /// A cell, once set, is never overwritten; attempting to do so is an
    /// error, as is an out-of-range coordinate.
    pub fn set(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), &'static str> {
        if row >= 3 || col >= 3 {
            return Err("Coordinates out of bounds (must be 0-2)");
        }
        if self.cells[row][col].is_some() {
            return Err("Cell is already occupied");
        }
        self.cells[row][col] = Some(mark);
        Ok(())
    }

    /// Empties a cell. Only the heuristic's look-ahead may undo a placement.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        if row < 3 && col < 3 {
            self.cells[row][col] = None;
        }
    }

    /// Checks whether a cell is unplayed.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        row < 3 && col < 3 && self.cells[row][col].is_none()
    }

    /// Checks whether every cell is played.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| cell.is_some())
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.cells[row][col] {
                    None => ".",
                    Some(Mark::X) => "X",
                    Some(Mark::O) => "O",
                };
                result.push_str(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// A single cell placement exchanged between peers over the move topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Identifies which game this move belongs to.
    #[serde(rename = "gameId")]
    pub game_id: String,
    /// The sender of the move.
    pub player: Player,
    /// Column, 0-2.
    pub x: usize,
    /// Row, 0-2.
    pub y: usize,
}
