//! Puzzle error types.

use derive_more::{Display, Error};
use tracing::instrument;

use super::scoring::MAX_DISKS;

/// What went wrong while building or addressing a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PuzzleErrorKind {
    /// Disk count outside `1..=MAX_DISKS`.
    #[display("invalid configuration: disk count {_0} is outside 1..={}", MAX_DISKS)]
    InvalidConfiguration(u32),
    /// Raw peg index outside `0..=2`.
    #[display("invalid peg index {_0}")]
    InvalidPeg(usize),
    /// Saved pegs, counter and history do not describe a reachable state.
    #[display("invalid layout: pegs do not match the move history")]
    InvalidLayout,
}

/// Puzzle error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Puzzle error: {} at {}:{}", kind, file, line)]
pub struct PuzzleError {
    /// Error category.
    pub kind: PuzzleErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PuzzleError {
    /// Creates a new puzzle error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: PuzzleErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
