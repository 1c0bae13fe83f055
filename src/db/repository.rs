//! SQLite-backed score ledger.

use diesel::connection::SimpleConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{NewScoreRecord, ScoreRecord, ScoreStore, StoreError, schema};
use crate::games::hanoi::Difficulty;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before failing, in ms.
const BUSY_TIMEOUT_MS: u32 = 2_000;

/// Score ledger stored in a SQLite file.
///
/// Every operation opens its own connection, so clones can be handed to
/// several sessions at once.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// Each connection sees its own `":memory:"` database, so use
    /// [`MemoryScoreStore`](crate::MemoryScoreStore) for a throwaway ledger.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::StoreUnavailable`](crate::StoreErrorKind)
    /// error if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_string();
        info!(path = %db_path, "Opening ScoreRepository");

        let mut conn = SqliteConnection::establish(&db_path).map_err(|e| {
            StoreError::unavailable(format!("Failed to open '{}': {}", db_path, e))
        })?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            StoreError::unavailable(format!("Failed to migrate '{}': {}", db_path, e))
        })?;
        debug!(applied = applied.len(), "Migrations applied");

        Ok(Self { db_path })
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::persistence(format!("Failed to connect to '{}': {}", self.db_path, e))
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }
}

impl ScoreStore for ScoreRepository {
    #[instrument(skip(self, name))]
    fn add_score(
        &self,
        name: &str,
        difficulty: Difficulty,
        moves: u32,
        score: f64,
    ) -> Result<ScoreRecord, StoreError> {
        debug!(name = %name, moves, score, "Recording score");
        let entry = NewScoreRecord::from_game(name, difficulty, moves, score)?;
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::scores::table)
            .values(&entry)
            .returning(ScoreRecord::as_returning())
            .get_result(&mut conn)?;

        info!(
            record_id = record.id(),
            name = %record.name(),
            difficulty = %record.difficulty(),
            score = record.score(),
            "Score recorded"
        );
        Ok(record)
    }

    #[instrument(skip(self))]
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        debug!(limit, "Loading top scores");
        let mut conn = self.connection()?;

        let records: Vec<ScoreRecord> = schema::scores::table
            .order((schema::scores::score.desc(), schema::scores::id.asc()))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(ScoreRecord::as_select())
            .load(&mut conn)?;

        info!(count = records.len(), "Top scores loaded");
        Ok(records)
    }

    #[instrument(skip(self))]
    fn best_score(&self, difficulty: Difficulty) -> Result<f64, StoreError> {
        debug!(%difficulty, "Loading best score");
        let mut conn = self.connection()?;

        let best: Option<f64> = schema::scores::table
            .filter(schema::scores::difficulty.eq(difficulty.as_db_str()))
            .select(max(schema::scores::score))
            .get_result(&mut conn)?;

        let best = best.unwrap_or(0.0);
        info!(%difficulty, best, "Best score loaded");
        Ok(best)
    }
}
