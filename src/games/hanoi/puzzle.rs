//! Puzzle state machine: three pegs, a move counter, and the solved check.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::difficulty::Difficulty;
use super::error::{PuzzleError, PuzzleErrorKind};
use super::scoring::{self, MAX_DISKS};
use super::solver;
use super::types::{Disk, Move, Peg, PegId, PuzzleStatus};

/// One puzzle instance.
///
/// Every disk `1..=disk_count` sits on exactly one peg, and every peg keeps
/// its disks in strictly decreasing size from bottom to top. Moves that
/// would break either property are ignored rather than reported, so the
/// puzzle is safe to poke speculatively (e.g. while hovering a drag).
///
/// Deserializing replays the recorded history from a fresh stack, so a
/// saved puzzle is accepted only if real play could have produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedPuzzle")]
pub struct Puzzle {
    pegs: [Peg; 3],
    disk_count: Disk,
    moves: u32,
    history: Vec<Move>,
}

/// Serialized form of a [`Puzzle`], unchecked.
#[derive(Debug, Deserialize)]
struct SavedPuzzle {
    pegs: [SavedPeg; 3],
    disk_count: u32,
    moves: u32,
    history: Vec<Move>,
}

#[derive(Debug, Deserialize)]
struct SavedPeg {
    disks: Vec<Disk>,
}

impl TryFrom<SavedPuzzle> for Puzzle {
    type Error = PuzzleError;

    #[instrument(skip(saved), fields(disk_count = saved.disk_count, moves = saved.moves))]
    fn try_from(saved: SavedPuzzle) -> Result<Self, Self::Error> {
        let mut puzzle = Self::new(saved.disk_count)?;
        for mv in &saved.history {
            if !puzzle.move_disk(mv.from, mv.to) {
                debug!(%mv, "Saved history contains an illegal move");
                return Err(PuzzleError::new(PuzzleErrorKind::InvalidLayout));
            }
        }

        let pegs_match = puzzle
            .pegs
            .iter()
            .zip(&saved.pegs)
            .all(|(peg, saved_peg)| peg.disks() == saved_peg.disks.as_slice());
        if !pegs_match || puzzle.moves != saved.moves {
            debug!("Saved pegs or counter disagree with the history");
            return Err(PuzzleError::new(PuzzleErrorKind::InvalidLayout));
        }
        Ok(puzzle)
    }
}

impl Puzzle {
    /// Creates a puzzle with all `disk_count` disks on the left peg.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleErrorKind::InvalidConfiguration`] when `disk_count`
    /// is zero or larger than [`MAX_DISKS`].
    #[instrument]
    pub fn new(disk_count: u32) -> Result<Self, PuzzleError> {
        if disk_count == 0 || disk_count > MAX_DISKS {
            return Err(PuzzleError::new(PuzzleErrorKind::InvalidConfiguration(
                disk_count,
            )));
        }
        // MAX_DISKS fits in a Disk, checked above.
        let disk_count = disk_count as Disk;
        debug!(disk_count, "Creating puzzle");
        Ok(Self::stacked(disk_count))
    }

    /// Creates a puzzle sized for the given difficulty.
    #[instrument]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::stacked(difficulty.disk_count())
    }

    fn stacked(disk_count: Disk) -> Self {
        Self {
            pegs: [Peg::stacked(disk_count), Peg::new(), Peg::new()],
            disk_count,
            moves: 0,
            history: Vec::new(),
        }
    }

    /// Puts every disk back on the left peg and zeroes the counter.
    #[instrument(skip(self), fields(disk_count = self.disk_count, moves = self.moves))]
    pub fn reset(&mut self) {
        *self = Self::stacked(self.disk_count);
        info!("Puzzle reset");
    }

    /// Whether moving the top disk of `from` onto `to` is legal.
    ///
    /// False for `from == to`, for an empty source, for a larger disk onto a
    /// smaller one, and for any move once the puzzle is solved.
    pub fn can_move(&self, from: PegId, to: PegId) -> bool {
        if from == to || self.is_solved() {
            return false;
        }
        match self.peg(from).top() {
            Some(disk) => self.peg(to).accepts(disk),
            None => false,
        }
    }

    /// Applies the move if it is legal; otherwise leaves the puzzle untouched.
    ///
    /// Returns whether the move was applied. A rejected move is not an error.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn move_disk(&mut self, from: PegId, to: PegId) -> bool {
        if !self.can_move(from, to) {
            debug!(%from, %to, "Move rejected");
            return false;
        }

        let Some(disk) = self.pegs[from.index()].pop() else {
            return false;
        };
        self.pegs[to.index()].push(disk);
        self.moves += 1;
        self.history.push(Move::new(from, to));
        debug!(disk, %from, %to, moves = self.moves, "Move applied");

        if self.is_solved() {
            info!(
                disk_count = self.disk_count,
                moves = self.moves,
                min_moves = self.min_moves(),
                "Puzzle solved"
            );
        }
        true
    }

    /// Whether every disk is on the right peg.
    pub fn is_solved(&self) -> bool {
        self.peg(PegId::Right).len() == usize::from(self.disk_count)
    }

    /// Current phase.
    pub fn status(&self) -> PuzzleStatus {
        if self.is_solved() {
            PuzzleStatus::Solved
        } else {
            PuzzleStatus::InProgress
        }
    }

    /// Optimal solution length, `2^disk_count - 1`.
    pub fn min_moves(&self) -> u32 {
        scoring::min_moves(u32::from(self.disk_count))
    }

    /// Score for the moves made so far (100 at optimal play, 0 before any move).
    pub fn score(&self) -> f64 {
        scoring::score(self.min_moves(), self.moves)
    }

    /// Number of moves applied since creation or the last reset.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Number of disks in play.
    pub fn disk_count(&self) -> Disk {
        self.disk_count
    }

    /// The given peg.
    pub fn peg(&self, id: PegId) -> &Peg {
        &self.pegs[id.index()]
    }

    /// All three pegs, left to right.
    pub fn pegs(&self) -> &[Peg; 3] {
        &self.pegs
    }

    /// Applied moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Next optimal move, while every move so far followed the optimal line.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn hint(&self) -> Option<Move> {
        if self.is_solved() {
            return None;
        }
        let on_track = self
            .history
            .iter()
            .zip(solver::solution(self.disk_count))
            .all(|(played, optimal)| *played == optimal);
        if !on_track {
            debug!("History left the optimal line, no hint");
            return None;
        }
        solver::optimal_move(self.disk_count, self.moves)
    }
}
