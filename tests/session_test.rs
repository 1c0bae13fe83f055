//! Tests for the unlock policy, game sessions and the lobby controller.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strictly_hanoi::{
    ActiveScreen, Difficulty, GameSession, Leaderboard, LobbyController, MemoryScoreStore,
    MoveOutcome, PegId, ScoreRecord, ScoreStore, SessionError, StoreError,
    available_difficulties, solution,
};

/// Store whose every call fails, standing in for a broken database.
struct FailingStore;

impl ScoreStore for FailingStore {
    fn add_score(
        &self,
        _name: &str,
        _difficulty: Difficulty,
        _moves: u32,
        _score: f64,
    ) -> Result<ScoreRecord, StoreError> {
        Err(StoreError::persistence("disk full"))
    }

    fn top_scores(&self, _limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        Err(StoreError::persistence("disk full"))
    }

    fn best_score(&self, _difficulty: Difficulty) -> Result<f64, StoreError> {
        Err(StoreError::persistence("disk full"))
    }
}

fn solve<S: ScoreStore>(session: &mut GameSession, leaderboard: &Leaderboard<S>) -> MoveOutcome {
    let mut last = MoveOutcome::Rejected;
    for mv in solution(session.difficulty().disk_count()) {
        last = session.request_move(leaderboard, mv.from, mv.to);
    }
    last
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn peg_key(peg: PegId) -> KeyEvent {
    let digit = char::from_digit(peg.index() as u32 + 1, 10).expect("Peg digit");
    key(KeyCode::Char(digit))
}

#[test]
fn test_unlock_empty_store_easy_only() {
    let store = MemoryScoreStore::new();
    let unlocked = available_difficulties(&store);
    assert!(unlocked.contains(Difficulty::Easy));
    assert!(!unlocked.contains(Difficulty::Medium));
    assert!(!unlocked.contains(Difficulty::Hard));
}

#[test]
fn test_unlock_threshold_opens_medium_and_hard() {
    let store = MemoryScoreStore::new();
    store
        .add_score("a", Difficulty::Easy, 14, 50.0)
        .expect("Insert failed");
    let unlocked = available_difficulties(&store);
    assert_eq!(unlocked.len(), 3);
    assert!(unlocked.contains(Difficulty::Hard));
}

#[test]
fn test_unlock_below_threshold() {
    let store = MemoryScoreStore::new();
    store
        .add_score("a", Difficulty::Easy, 15, 46.67)
        .expect("Insert failed");
    // Scores on other tiers do not count.
    store
        .add_score("b", Difficulty::Medium, 15, 100.0)
        .expect("Insert failed");
    assert_eq!(available_difficulties(&store).len(), 1);
}

#[test]
fn test_unlock_failing_store_easy_only() {
    let unlocked = available_difficulties(&FailingStore);
    assert_eq!(unlocked.len(), 1);
    assert!(unlocked.contains(Difficulty::Easy));
}

#[test]
fn test_start_rejects_blank_name() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let err = leaderboard
        .start("   ", Difficulty::Easy)
        .expect_err("Blank name should fail");
    assert_eq!(err, SessionError::EmptyName);
}

#[test]
fn test_start_rejects_locked_difficulty() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let err = leaderboard
        .start("Ada", Difficulty::Hard)
        .expect_err("Hard should be locked");
    assert_eq!(
        err,
        SessionError::DifficultyLocked {
            difficulty: Difficulty::Hard
        }
    );
}

#[test]
fn test_start_trims_player_name() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let session = leaderboard
        .start("  Ada ", Difficulty::Easy)
        .expect("Start failed");
    assert_eq!(session.player(), "Ada");
}

#[test]
fn test_solved_session_records_and_unlocks() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let mut session = leaderboard
        .start("Ada", Difficulty::Easy)
        .expect("Start failed");

    let MoveOutcome::Solved(completion) = solve(&mut session, &leaderboard) else {
        panic!("Optimal play should solve the puzzle");
    };
    assert_eq!(*completion.moves(), 7);
    assert_eq!(*completion.min_moves(), 7);
    assert_eq!(*completion.score(), 100.0);
    assert!(*completion.saved());
    assert_eq!(*completion.next_level(), Some(Difficulty::Medium));

    let snapshot = leaderboard.snapshot();
    assert_eq!(snapshot.top_scores().len(), 1);
    assert_eq!(snapshot.top_scores()[0].name(), "Ada");
    assert!(snapshot.unlocked().contains(Difficulty::Medium));
    assert!(leaderboard.start("Ada", Difficulty::Hard).is_ok());
}

#[test]
fn test_move_outcomes() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let mut session = leaderboard
        .start("Ada", Difficulty::Easy)
        .expect("Start failed");

    assert_eq!(
        session.request_move(&leaderboard, PegId::Middle, PegId::Right),
        MoveOutcome::Rejected
    );
    assert_eq!(
        session.request_move(&leaderboard, PegId::Left, PegId::Right),
        MoveOutcome::Applied
    );
    assert!(!session.can_move(PegId::Left, PegId::Right));
}

#[test]
fn test_poor_score_offers_no_next_level() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let mut session = leaderboard
        .start("Ada", Difficulty::Easy)
        .expect("Start failed");
    // Shuffle the smallest disk back and forth to waste moves.
    for _ in 0..4 {
        session.request_move(&leaderboard, PegId::Left, PegId::Middle);
        session.request_move(&leaderboard, PegId::Middle, PegId::Left);
    }

    let MoveOutcome::Solved(completion) = solve(&mut session, &leaderboard) else {
        panic!("Puzzle should be solved");
    };
    assert_eq!(*completion.moves(), 15);
    assert!(*completion.score() < 50.0);
    assert_eq!(*completion.next_level(), None);
    assert!(session.next_level().is_none());
    assert!(!leaderboard.unlocked().contains(Difficulty::Medium));
}

#[test]
fn test_hard_offers_no_next_level() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let mut session = GameSession::new("Ada".to_string(), Difficulty::Hard);
    let MoveOutcome::Solved(completion) = solve(&mut session, &leaderboard) else {
        panic!("Puzzle should be solved");
    };
    assert_eq!(*completion.moves(), 1023);
    assert_eq!(*completion.next_level(), None);
}

#[test]
fn test_next_level_session() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let mut session = GameSession::new("Ada".to_string(), Difficulty::Medium);
    assert!(session.next_level().is_none());
    solve(&mut session, &leaderboard);

    let next = session.next_level().expect("Hard should be offered");
    assert_eq!(*next.difficulty(), Difficulty::Hard);
    assert_eq!(next.player(), "Ada");
    assert_eq!(next.puzzle().moves(), 0);
}

#[test]
fn test_failing_store_keeps_game_playable() {
    let leaderboard = Leaderboard::new(FailingStore, 5);
    let mut session = leaderboard
        .start("Ada", Difficulty::Easy)
        .expect("Easy stays open");

    let MoveOutcome::Solved(completion) = solve(&mut session, &leaderboard) else {
        panic!("Puzzle should be solved");
    };
    assert!(!*completion.saved());
    assert!(session.puzzle().is_solved());

    let snapshot = leaderboard.snapshot();
    assert!(snapshot.top_scores().is_empty());
    assert!(snapshot.notice().is_some());
}

#[test]
fn test_disabled_leaderboard() {
    let leaderboard: Leaderboard<MemoryScoreStore> =
        Leaderboard::from_open(Err(StoreError::unavailable("no file")), 5);
    assert!(!leaderboard.is_available());
    assert_eq!(leaderboard.unlocked().len(), 1);

    let mut session = leaderboard
        .start("Ada", Difficulty::Easy)
        .expect("Easy stays open");
    let MoveOutcome::Solved(completion) = solve(&mut session, &leaderboard) else {
        panic!("Puzzle should be solved");
    };
    assert!(!*completion.saved());
    let err = leaderboard
        .record("Ada", Difficulty::Easy, 7, 100.0)
        .expect_err("Disabled leaderboard cannot record");
    assert!(err.is_unavailable());
}

#[test]
fn test_restart_clears_completion() {
    let leaderboard = Leaderboard::new(MemoryScoreStore::new(), 5);
    let mut session = GameSession::new("Ada".to_string(), Difficulty::Easy);
    solve(&mut session, &leaderboard);
    assert!(session.completion().is_some());

    session.restart();
    assert!(session.completion().is_none());
    assert_eq!(session.puzzle().moves(), 0);
    assert!(!session.puzzle().is_solved());
}

#[test]
fn test_controller_full_round() {
    let mut controller = LobbyController::new(Leaderboard::new(MemoryScoreStore::new(), 5));
    let mut screen = controller.first_screen();

    for c in "Ada".chars() {
        screen = controller
            .step(screen, key(KeyCode::Char(c)))
            .expect("Typing stays in the lobby");
    }
    screen = controller
        .step(screen, key(KeyCode::Enter))
        .expect("Start stays in the lobby");
    assert!(matches!(screen, ActiveScreen::Board(_)));

    for mv in solution(Difficulty::Easy.disk_count()) {
        screen = controller
            .step(screen, peg_key(mv.from))
            .expect("Selecting stays in the lobby");
        screen = controller
            .step(screen, peg_key(mv.to))
            .expect("Moving stays in the lobby");
    }
    let ActiveScreen::Victory(victory) = &screen else {
        panic!("Solved board should show victory");
    };
    assert_eq!(victory.player(), "Ada");
    assert!(victory.offers_next_level());

    screen = controller
        .step(screen, key(KeyCode::Esc))
        .expect("Esc returns to the menu");
    let ActiveScreen::Menu(menu) = &screen else {
        panic!("Expected the menu");
    };
    assert_eq!(menu.name_input(), "Ada");
    assert_eq!(menu.snapshot().top_scores().len(), 1);
    assert!(menu.snapshot().unlocked().contains(Difficulty::Hard));

    assert!(controller.step(screen, key(KeyCode::Esc)).is_none());
}
