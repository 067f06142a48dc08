pub mod heuristic;
pub mod rules;
mod types;

pub use types::{Board, Mark, MoveEvent, Player};
