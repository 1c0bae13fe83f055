//! Difficulty tiers and the disk count each one plays with.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::instrument;

/// Difficulty tier selectable from the menu.
///
/// The textual form (`"EASY"`, `"MEDIUM"`, `"HARD"`) is what the score
/// ledger stores in its `difficulty` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Three disks.
    Easy,
    /// Four disks.
    Medium,
    /// Ten disks.
    Hard,
}

impl Difficulty {
    /// Number of disks a puzzle of this difficulty starts with.
    #[instrument]
    pub fn disk_count(self) -> u8 {
        match self {
            Self::Easy => 3,
            Self::Medium => 4,
            Self::Hard => 10,
        }
    }

    /// The tier offered after a good result on this one, if any.
    #[instrument]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Easy => Some(Self::Medium),
            Self::Medium => Some(Self::Hard),
            Self::Hard => None,
        }
    }

    /// Stored column value for this difficulty.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}
