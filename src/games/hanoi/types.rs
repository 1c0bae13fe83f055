//! Core domain types for the Tower of Hanoi.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::{PuzzleError, PuzzleErrorKind};

/// A disk, identified by its size (1 is the smallest).
pub type Disk = u8;

/// One of the three pegs, left to right.
///
/// Peg 0 is the source every puzzle starts on and peg 2 is the target.
///
/// Displays as its board letter, the same notation [`Move`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PegId {
    /// Peg 0, where all disks start.
    Left,
    /// Peg 1.
    Middle,
    /// Peg 2, the target peg.
    Right,
}

impl PegId {
    /// All pegs in index order.
    pub const ALL: [PegId; 3] = [PegId::Left, PegId::Middle, PegId::Right];

    /// Zero-based index of this peg.
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }

    /// Converts a raw index into a peg.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleErrorKind::InvalidPeg`] for indices outside `0..=2`.
    #[instrument]
    pub fn from_index(index: usize) -> Result<Self, PuzzleError> {
        match index {
            0 => Ok(Self::Left),
            1 => Ok(Self::Middle),
            2 => Ok(Self::Right),
            other => Err(PuzzleError::new(PuzzleErrorKind::InvalidPeg(other))),
        }
    }

    /// Letter shown under the peg (`A`, `B`, `C`).
    pub fn label(self) -> char {
        match self {
            Self::Left => 'A',
            Self::Middle => 'B',
            Self::Right => 'C',
        }
    }
}

impl std::fmt::Display for PegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<usize> for PegId {
    type Error = PuzzleError;

    #[track_caller]
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// A stack of disks, bottom first.
///
/// Sizes strictly decrease from bottom to top; [`Peg::accepts`] is the
/// only gate for pushing, so the ordering holds whenever moves go through
/// [`Puzzle`](super::Puzzle).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Peg {
    disks: Vec<Disk>,
}

impl Peg {
    /// Creates an empty peg.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a peg holding disks `disk_count..=1`, largest at the bottom.
    pub fn stacked(disk_count: Disk) -> Self {
        Self {
            disks: (1..=disk_count).rev().collect(),
        }
    }

    /// Disks from bottom to top.
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// The topmost disk, if any.
    pub fn top(&self) -> Option<Disk> {
        self.disks.last().copied()
    }

    /// Number of disks on the peg.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether the peg holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Whether `disk` may be placed on top of this peg.
    pub fn accepts(&self, disk: Disk) -> bool {
        self.top().is_none_or(|top| disk < top)
    }

    pub(crate) fn push(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    pub(crate) fn pop(&mut self) -> Option<Disk> {
        self.disks.pop()
    }
}

/// Relocation of the top disk of one peg onto another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Peg the disk leaves.
    pub from: PegId,
    /// Peg the disk lands on.
    pub to: PegId,
}

impl Move {
    /// Creates a move between two pegs.
    pub fn new(from: PegId, to: PegId) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// Phase of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleStatus {
    /// Moves are still accepted.
    InProgress,
    /// Every disk sits on the target peg; only a reset leaves this state.
    Solved,
}
