//! Strictly Hanoi library - Tower of Hanoi with scoring and a leaderboard
//!
//! # Architecture
//!
//! - **Games**: the puzzle state machine, minimum moves and scoring
//! - **Db**: the append-only score ledger (SQLite or in-memory)
//! - **Unlock**: which difficulties the menu may offer
//! - **Session**: wires a difficulty to a puzzle and records solved games
//! - **Lobby**: terminal front end that calls into the above
//!
//! # Example
//!
//! ```
//! use strictly_hanoi::{
//!     Difficulty, GameSession, Leaderboard, MemoryScoreStore, MoveOutcome, PegId, solution,
//! };
//!
//! let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
//! let mut session = leaderboard.start("Ada", Difficulty::Easy).expect("Easy is always open");
//!
//! let mut last = MoveOutcome::Rejected;
//! for mv in solution(Difficulty::Easy.disk_count()) {
//!     last = session.request_move(&leaderboard, mv.from, mv.to);
//! }
//! assert!(matches!(last, MoveOutcome::Solved(_)));
//! assert_eq!(session.puzzle().peg(PegId::Right).disks(), &[3, 2, 1]);
//! assert!(leaderboard.unlocked().contains(Difficulty::Hard));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod lobby;
mod session;
mod unlock;

// Crate-level exports - Configuration
pub use config::{ConfigError, HanoiConfig};

// Crate-level exports - Score ledger
pub use db::{
    DEFAULT_TOP_SCORES, MemoryScoreStore, NewScoreRecord, ScoreRecord, ScoreRepository,
    ScoreStore, StoreError, StoreErrorKind,
};

// Crate-level exports - Puzzle
pub use games::hanoi::{
    Difficulty, Disk, MAX_DISKS, Move, PERFECT_SCORE, Peg, PegId, Puzzle, PuzzleError,
    PuzzleErrorKind, PuzzleStatus, min_moves, optimal_move, score, solution,
};

// Crate-level exports - Unlock policy
pub use unlock::{UNLOCK_THRESHOLD, UnlockSet, available_difficulties};

// Crate-level exports - Sessions
pub use session::{Completion, GameSession, Leaderboard, MenuSnapshot, MoveOutcome, SessionError};

// Crate-level exports - Terminal front end
pub use lobby::{
    ActiveScreen, BoardScreen, LobbyController, MenuScreen, Screen, ScreenTransition,
    VictoryScreen, disk_color, disk_width, peg_lines, run_lobby,
};
