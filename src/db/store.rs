//! The score ledger contract shared by every backing store.

use crate::db::{ScoreRecord, StoreError};
use crate::games::hanoi::Difficulty;

/// Number of entries shown on the leaderboard by default.
pub const DEFAULT_TOP_SCORES: usize = 5;

/// Append-only ledger of completed games.
///
/// Each call stands on its own: a read never observes a half-written
/// record, and no transaction spans calls.
pub trait ScoreStore {
    /// Appends a record; the store assigns its id and timestamp.
    ///
    /// Any name is accepted, including an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    fn add_score(
        &self,
        name: &str,
        difficulty: Difficulty,
        moves: u32,
        score: f64,
    ) -> Result<ScoreRecord, StoreError>;

    /// The `limit` highest scores, descending, ties in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails. An empty ledger is not an error.
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError>;

    /// Highest score recorded for `difficulty`, or `0.0` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails.
    fn best_score(&self, difficulty: Difficulty) -> Result<f64, StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for &S {
    fn add_score(
        &self,
        name: &str,
        difficulty: Difficulty,
        moves: u32,
        score: f64,
    ) -> Result<ScoreRecord, StoreError> {
        (**self).add_score(name, difficulty, moves, score)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        (**self).top_scores(limit)
    }

    fn best_score(&self, difficulty: Difficulty) -> Result<f64, StoreError> {
        (**self).best_score(difficulty)
    }
}
