//! Score store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StoreErrorKind {
    /// The backing database could not be opened or migrated.
    #[display("store unavailable")]
    StoreUnavailable,
    /// A read or write against an opened store failed.
    #[display("persistence error")]
    PersistenceError,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Failure category.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// The backing store could not be opened.
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::StoreUnavailable, message)
    }

    /// A read or write failed.
    #[track_caller]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::PersistenceError, message)
    }

    /// Whether this error means the store never opened.
    pub fn is_unavailable(&self) -> bool {
        self.kind == StoreErrorKind::StoreUnavailable
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::persistence(format!("Connection error: {}", err))
    }
}
