//! In-memory score ledger.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::db::{NewScoreRecord, ScoreRecord, ScoreStore, StoreError};
use crate::games::hanoi::Difficulty;

/// Score ledger held in process memory; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    records: Mutex<Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records().map(|records| records.len()).unwrap_or(0)
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<ScoreRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::persistence("Score ledger lock poisoned"))
    }
}

impl ScoreStore for MemoryScoreStore {
    #[instrument(skip(self, name))]
    fn add_score(
        &self,
        name: &str,
        difficulty: Difficulty,
        moves: u32,
        score: f64,
    ) -> Result<ScoreRecord, StoreError> {
        let entry = NewScoreRecord::from_game(name, difficulty, moves, score)?;
        let mut records = self.records()?;
        let id = i32::try_from(records.len() + 1)
            .map_err(|_| StoreError::persistence("Score ledger is full"))?;
        let record = ScoreRecord::from_parts(id, entry, Utc::now().naive_utc());
        records.push(record.clone());
        debug!(record_id = id, "Score recorded in memory");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut ranked = self.records()?.clone();
        // Stable sort keeps insertion order among equal scores.
        ranked.sort_by(|a, b| b.score().total_cmp(a.score()));
        ranked.truncate(limit);
        Ok(ranked)
    }

    #[instrument(skip(self))]
    fn best_score(&self, difficulty: Difficulty) -> Result<f64, StoreError> {
        let best = self
            .records()?
            .iter()
            .filter(|record| record.difficulty() == difficulty.as_db_str())
            .map(|record| *record.score())
            .fold(None, |best: Option<f64>, score| {
                Some(best.map_or(score, |b| b.max(score)))
            });
        Ok(best.unwrap_or(0.0))
    }
}
