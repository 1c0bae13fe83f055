//! Score ledger persistence.

mod error;
mod memory;
mod models;
mod repository;
mod schema;
mod store;

pub use error::{StoreError, StoreErrorKind};
pub use memory::MemoryScoreStore;
pub use models::{NewScoreRecord, ScoreRecord};
pub use repository::ScoreRepository;
pub use store::{DEFAULT_TOP_SCORES, ScoreStore};
