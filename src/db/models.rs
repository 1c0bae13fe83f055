//! Score ledger models.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{StoreError, schema};
use crate::games::hanoi::Difficulty;

/// A completed game as stored in the ledger. Immutable once written.
#[derive(
    Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Getters, Serialize, Deserialize,
)]
#[diesel(table_name = schema::scores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScoreRecord {
    id: i32,
    name: String,
    difficulty: String,
    moves: i32,
    score: f64,
    date_played: NaiveDateTime,
}

impl ScoreRecord {
    /// Builds a record for stores that assign ids and timestamps themselves.
    pub(crate) fn from_parts(
        id: i32,
        entry: NewScoreRecord,
        date_played: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: entry.name,
            difficulty: entry.difficulty,
            moves: entry.moves,
            score: entry.score,
            date_played,
        }
    }

    /// Parses the stored difficulty column.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the column holds an unknown value.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn parse_difficulty(&self) -> Result<Difficulty, StoreError> {
        Difficulty::from_str(&self.difficulty).map_err(|_| {
            StoreError::persistence(format!("Invalid difficulty: '{}'", self.difficulty))
        })
    }
}

/// Insertable score row; `id` and `date_played` are filled in by the store.
#[derive(Debug, Clone, PartialEq, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScoreRecord {
    name: String,
    difficulty: String,
    moves: i32,
    score: f64,
}

impl NewScoreRecord {
    /// Builds a row from domain values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `moves` does not fit the integer column.
    #[instrument(skip(name))]
    pub fn from_game(
        name: &str,
        difficulty: Difficulty,
        moves: u32,
        score: f64,
    ) -> Result<Self, StoreError> {
        let moves = i32::try_from(moves).map_err(|_| {
            StoreError::persistence(format!("Move count {} exceeds storage range", moves))
        })?;
        Ok(Self::new(
            name.to_string(),
            difficulty.as_db_str().to_string(),
            moves,
            score,
        ))
    }
}
