//! Tower of Hanoi: pegs, moves, scoring and the optimal solution.

mod difficulty;
mod error;
mod puzzle;
mod scoring;
mod solver;
mod types;

pub use difficulty::Difficulty;
pub use error::{PuzzleError, PuzzleErrorKind};
pub use puzzle::Puzzle;
pub use scoring::{MAX_DISKS, PERFECT_SCORE, min_moves, score};
pub use solver::{optimal_move, solution};
pub use types::{Disk, Move, Peg, PegId, PuzzleStatus};
