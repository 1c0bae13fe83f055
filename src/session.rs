//! Session orchestration: menu data, game sessions, and result recording.
//!
//! The store is passed in explicitly. When it could not be opened the
//! [`Leaderboard`] runs disabled: games stay playable, results are not
//! saved, and only Easy is open.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use crate::games::hanoi::{Difficulty, PegId, Puzzle};
use crate::unlock::{UNLOCK_THRESHOLD, UnlockSet, available_difficulties};
use crate::{ScoreRecord, ScoreStore, StoreError};

/// Reasons a game cannot be started.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The player name is empty or whitespace.
    #[display("Player name cannot be empty")]
    EmptyName,
    /// The difficulty has not been unlocked yet.
    #[display("{difficulty} is locked")]
    DifficultyLocked {
        /// The locked tier.
        difficulty: Difficulty,
    },
}

/// What the menu shows on each visit.
#[derive(Debug, Clone, Getters)]
pub struct MenuSnapshot {
    unlocked: UnlockSet,
    top_scores: Vec<ScoreRecord>,
    notice: Option<String>,
}

/// Access to the score ledger for menus and finished games.
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: Option<S>,
    limit: usize,
}

impl<S: ScoreStore> Leaderboard<S> {
    /// Wraps an opened store.
    #[instrument(skip(store))]
    pub fn new(store: S, limit: usize) -> Self {
        info!(limit, "Creating Leaderboard");
        Self {
            store: Some(store),
            limit,
        }
    }

    /// A leaderboard with no backing store.
    #[instrument]
    pub fn disabled(limit: usize) -> Self {
        warn!("Leaderboard disabled, results will not be saved");
        Self { store: None, limit }
    }

    /// Wraps the result of opening a store, falling back to disabled.
    #[instrument(skip(opened))]
    pub fn from_open(opened: Result<S, StoreError>, limit: usize) -> Self {
        match opened {
            Ok(store) => Self::new(store, limit),
            Err(e) => {
                warn!(error = %e, "Score store unavailable");
                Self::disabled(limit)
            }
        }
    }

    /// Whether a backing store is attached.
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// The backing store, if any.
    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Number of leaderboard entries shown.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Difficulties open right now.
    #[instrument(skip(self))]
    pub fn unlocked(&self) -> UnlockSet {
        match &self.store {
            Some(store) => available_difficulties(store),
            None => UnlockSet::easy_only(),
        }
    }

    /// Loads everything the menu displays.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> MenuSnapshot {
        let Some(store) = &self.store else {
            return MenuSnapshot {
                unlocked: UnlockSet::easy_only(),
                top_scores: Vec::new(),
                notice: Some("Leaderboard unavailable, scores will not be saved".to_string()),
            };
        };

        let unlocked = available_difficulties(store);
        match store.top_scores(self.limit) {
            Ok(top_scores) => MenuSnapshot {
                unlocked,
                top_scores,
                notice: None,
            },
            Err(e) => {
                warn!(error = %e, "Failed to load top scores");
                MenuSnapshot {
                    unlocked,
                    top_scores: Vec::new(),
                    notice: Some("Could not load the leaderboard".to_string()),
                }
            }
        }
    }

    /// Starts a game for `player` at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyName`] for a blank name and
    /// [`SessionError::DifficultyLocked`] when the tier is not open.
    #[instrument(skip(self))]
    pub fn start(&self, player: &str, difficulty: Difficulty) -> Result<GameSession, SessionError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if !self.unlocked().contains(difficulty) {
            debug!(%difficulty, "Rejected locked difficulty");
            return Err(SessionError::DifficultyLocked { difficulty });
        }
        Ok(GameSession::new(player.to_string(), difficulty))
    }

    /// Saves a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the leaderboard is disabled or the write fails.
    #[instrument(skip(self))]
    pub fn record(
        &self,
        player: &str,
        difficulty: Difficulty,
        moves: u32,
        score: f64,
    ) -> Result<ScoreRecord, StoreError> {
        match &self.store {
            Some(store) => store.add_score(player, difficulty, moves, score),
            None => Err(StoreError::unavailable("Leaderboard is disabled")),
        }
    }
}

/// Summary of a solved game.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Completion {
    moves: u32,
    min_moves: u32,
    score: f64,
    saved: bool,
    next_level: Option<Difficulty>,
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The move was illegal and nothing changed.
    Rejected,
    /// The move was applied; the puzzle is not solved yet.
    Applied,
    /// The move solved the puzzle.
    Solved(Completion),
}

/// One player working one puzzle.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    player: String,
    difficulty: Difficulty,
    puzzle: Puzzle,
    completion: Option<Completion>,
}

impl GameSession {
    /// Creates a session with a fresh puzzle.
    #[instrument]
    pub fn new(player: String, difficulty: Difficulty) -> Self {
        info!(player = %player, %difficulty, "Starting game session");
        Self {
            player,
            difficulty,
            puzzle: Puzzle::for_difficulty(difficulty),
            completion: None,
        }
    }

    /// Whether the move is legal right now.
    pub fn can_move(&self, from: PegId, to: PegId) -> bool {
        self.puzzle.can_move(from, to)
    }

    /// Applies a move and, if it solves the puzzle, records the result.
    ///
    /// A failed write is logged and reported through
    /// [`Completion::saved`]; the session itself is unaffected.
    #[instrument(skip(self, leaderboard), fields(player = %self.player, difficulty = %self.difficulty))]
    pub fn request_move<S: ScoreStore>(
        &mut self,
        leaderboard: &Leaderboard<S>,
        from: PegId,
        to: PegId,
    ) -> MoveOutcome {
        if !self.puzzle.move_disk(from, to) {
            return MoveOutcome::Rejected;
        }
        if !self.puzzle.is_solved() {
            return MoveOutcome::Applied;
        }

        let moves = self.puzzle.moves();
        let score = self.puzzle.score();
        let saved = match leaderboard.record(&self.player, self.difficulty, moves, score) {
            Ok(record) => {
                info!(record_id = record.id(), score, "Result saved");
                true
            }
            Err(e) => {
                warn!(error = %e, "Result not saved");
                false
            }
        };

        let next_level = self.difficulty.next().filter(|_| score >= UNLOCK_THRESHOLD);
        let completion = Completion {
            moves,
            min_moves: self.puzzle.min_moves(),
            score,
            saved,
            next_level,
        };
        self.completion = Some(completion.clone());
        MoveOutcome::Solved(completion)
    }

    /// Starts the same puzzle over.
    #[instrument(skip(self), fields(player = %self.player, difficulty = %self.difficulty))]
    pub fn restart(&mut self) {
        self.puzzle.reset();
        self.completion = None;
    }

    /// Session for the next tier when the finished game earned it.
    ///
    /// The offer is earned by this game's score, so it bypasses the menu's
    /// unlock check.
    #[instrument(skip(self))]
    pub fn next_level(&self) -> Option<GameSession> {
        let next = self.completion.as_ref()?.next_level?;
        Some(GameSession::new(self.player.clone(), next))
    }
}
