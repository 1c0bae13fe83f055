//! Difficulty unlock policy.
//!
//! Easy is always open. Medium and Hard open together once the best Easy
//! score reaches [`UNLOCK_THRESHOLD`]; Hard is not gated behind Medium.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

use crate::ScoreStore;
use crate::games::hanoi::Difficulty;

/// Best Easy score that opens the higher tiers.
pub const UNLOCK_THRESHOLD: f64 = 50.0;

/// Difficulties currently open for selection. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockSet {
    open: BTreeSet<Difficulty>,
}

impl UnlockSet {
    /// Only Easy open.
    pub fn easy_only() -> Self {
        Self {
            open: BTreeSet::from([Difficulty::Easy]),
        }
    }

    /// Applies the policy to a best Easy score.
    #[instrument]
    pub fn from_easy_best(easy_best: f64) -> Self {
        if easy_best >= UNLOCK_THRESHOLD {
            Self {
                open: Difficulty::iter().collect(),
            }
        } else {
            Self::easy_only()
        }
    }

    /// Whether `difficulty` may be selected.
    pub fn contains(&self, difficulty: Difficulty) -> bool {
        self.open.contains(&difficulty)
    }

    /// Open difficulties, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.open.iter().copied()
    }

    /// Number of open difficulties.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Always false; Easy is never locked.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Difficulties open for selection given the ledger's current contents.
///
/// Reads the store on every call. A failed read leaves only Easy open.
#[instrument(skip(store))]
pub fn available_difficulties<S: ScoreStore + ?Sized>(store: &S) -> UnlockSet {
    match store.best_score(Difficulty::Easy) {
        Ok(best) => {
            let unlocked = UnlockSet::from_easy_best(best);
            debug!(easy_best = best, open = unlocked.len(), "Unlocks evaluated");
            unlocked
        }
        Err(e) => {
            warn!(error = %e, "Best score unavailable, only Easy is open");
            UnlockSet::easy_only()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(UnlockSet::from_easy_best(49.99).len(), 1);
        assert_eq!(UnlockSet::from_easy_best(50.0).len(), 3);
    }

    #[test]
    fn test_iteration_order() {
        let all: Vec<Difficulty> = UnlockSet::from_easy_best(100.0).iter().collect();
        assert_eq!(
            all,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }
}
