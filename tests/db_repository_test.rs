//! Tests for the SQLite and in-memory score ledgers.

use tempfile::NamedTempFile;

use strictly_hanoi::{Difficulty, MemoryScoreStore, ScoreRepository, ScoreStore, StoreErrorKind};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, ScoreRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = ScoreRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

#[test]
fn test_add_score_assigns_id_and_fields() {
    let (_db, repo) = setup_test_db();
    let record = repo
        .add_score("Alice", Difficulty::Easy, 7, 100.0)
        .expect("Insert failed");

    assert!(*record.id() > 0);
    assert_eq!(record.name(), "Alice");
    assert_eq!(record.difficulty(), "EASY");
    assert_eq!(*record.moves(), 7);
    assert_eq!(*record.score(), 100.0);
    assert_eq!(
        record.parse_difficulty().expect("Known difficulty"),
        Difficulty::Easy
    );
}

#[test]
fn test_add_score_accepts_empty_name() {
    let (_db, repo) = setup_test_db();
    let record = repo
        .add_score("", Difficulty::Medium, 20, 75.0)
        .expect("Insert failed");
    assert_eq!(record.name(), "");
}

#[test]
fn test_top_scores_empty() {
    let (_db, repo) = setup_test_db();
    let top = repo.top_scores(5).expect("Query failed");
    assert!(top.is_empty());
}

#[test]
fn test_top_scores_descending_ties_by_insertion() {
    let (_db, repo) = setup_test_db();
    for (name, score) in [
        ("a", 30.0),
        ("b", 90.0),
        ("c", 90.0),
        ("d", 10.0),
        ("e", 50.0),
        ("f", 70.0),
    ] {
        repo.add_score(name, Difficulty::Easy, 10, score)
            .expect("Insert failed");
    }

    let top = repo.top_scores(5).expect("Query failed");
    let scores: Vec<f64> = top.iter().map(|r| *r.score()).collect();
    assert_eq!(scores, vec![90.0, 90.0, 70.0, 50.0, 30.0]);
    assert_eq!(top[0].name(), "b");
    assert_eq!(top[1].name(), "c");
    assert!(top[0].id() < top[1].id());
    assert!(!top.iter().any(|r| r.name() == "d"));
}

#[test]
fn test_top_scores_limit() {
    let (_db, repo) = setup_test_db();
    for score in [10.0, 20.0, 30.0] {
        repo.add_score("p", Difficulty::Easy, 10, score)
            .expect("Insert failed");
    }
    assert_eq!(repo.top_scores(2).expect("Query failed").len(), 2);
    assert_eq!(repo.top_scores(10).expect("Query failed").len(), 3);
    assert!(repo.top_scores(0).expect("Query failed").is_empty());
}

#[test]
fn test_best_score_defaults_to_zero() {
    let (_db, repo) = setup_test_db();
    assert_eq!(repo.best_score(Difficulty::Hard).expect("Query failed"), 0.0);
}

#[test]
fn test_best_score_per_difficulty() {
    let (_db, repo) = setup_test_db();
    repo.add_score("a", Difficulty::Easy, 14, 50.0)
        .expect("Insert failed");
    repo.add_score("b", Difficulty::Easy, 10, 70.0)
        .expect("Insert failed");
    repo.add_score("c", Difficulty::Medium, 15, 100.0)
        .expect("Insert failed");

    assert_eq!(repo.best_score(Difficulty::Easy).expect("Query failed"), 70.0);
    assert_eq!(
        repo.best_score(Difficulty::Medium).expect("Query failed"),
        100.0
    );
    assert_eq!(repo.best_score(Difficulty::Hard).expect("Query failed"), 0.0);
}

#[test]
fn test_records_survive_reopen() {
    let (db, repo) = setup_test_db();
    repo.add_score("Alice", Difficulty::Easy, 7, 100.0)
        .expect("Insert failed");

    let path = db.path().to_str().expect("Invalid path");
    let reopened = ScoreRepository::open(path).expect("Reopen failed");
    let top = reopened.top_scores(5).expect("Query failed");
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name(), "Alice");
}

#[test]
fn test_open_missing_directory_is_unavailable() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing").join("scores.db");
    let err = ScoreRepository::open(path.to_str().expect("Invalid path"))
        .expect_err("Open should fail");
    assert_eq!(err.kind, StoreErrorKind::StoreUnavailable);
    assert!(err.is_unavailable());
}

// Ledger contract shared by the SQLite and in-memory stores.

fn assert_ties_in_insertion_order<S: ScoreStore>(store: &S) {
    for (name, score) in [
        ("a", 30.0),
        ("b", 90.0),
        ("c", 90.0),
        ("d", 10.0),
        ("e", 50.0),
        ("f", 70.0),
    ] {
        store
            .add_score(name, Difficulty::Easy, 10, score)
            .expect("Insert failed");
    }

    let ranked: Vec<String> = store
        .top_scores(5)
        .expect("Query failed")
        .iter()
        .map(|r| format!("{}:{}", r.name(), r.score()))
        .collect();
    assert_eq!(ranked, vec!["b:90", "c:90", "f:70", "e:50", "a:30"]);

    assert_eq!(store.top_scores(2).expect("Query failed").len(), 2);
    assert_eq!(store.top_scores(100).expect("Query failed").len(), 6);
    assert!(store.top_scores(0).expect("Query failed").is_empty());
}

fn assert_best_is_per_difficulty_max<S: ScoreStore>(store: &S) {
    assert_eq!(store.best_score(Difficulty::Easy).expect("Query failed"), 0.0);
    for (difficulty, score) in [
        (Difficulty::Easy, 46.67),
        (Difficulty::Easy, 87.5),
        (Difficulty::Easy, 50.0),
        (Difficulty::Medium, 100.0),
    ] {
        store
            .add_score("p", difficulty, 8, score)
            .expect("Insert failed");
    }
    assert_eq!(store.best_score(Difficulty::Easy).expect("Query failed"), 87.5);
    assert_eq!(
        store.best_score(Difficulty::Medium).expect("Query failed"),
        100.0
    );
    assert_eq!(store.best_score(Difficulty::Hard).expect("Query failed"), 0.0);
}

#[test]
fn test_repository_ties_and_limits() {
    let (_db, repo) = setup_test_db();
    assert_ties_in_insertion_order(&repo);
}

#[test]
fn test_memory_store_ties_and_limits() {
    assert_ties_in_insertion_order(&MemoryScoreStore::new());
}

#[test]
fn test_repository_best_score_is_max() {
    let (_db, repo) = setup_test_db();
    assert_best_is_per_difficulty_max(&repo);
}

#[test]
fn test_memory_store_best_score_is_max() {
    assert_best_is_per_difficulty_max(&MemoryScoreStore::new());
}

#[test]
fn test_memory_store_assigns_increasing_ids() {
    let store = MemoryScoreStore::new();
    assert!(store.is_empty());
    let first = store
        .add_score("", Difficulty::Hard, 1023, 100.0)
        .expect("Insert failed");
    let second = store
        .add_score("b", Difficulty::Hard, 1100, 93.0)
        .expect("Insert failed");
    assert!(first.id() < second.id());
    assert_eq!(first.name(), "");
    assert_eq!(store.len(), 2);
}
