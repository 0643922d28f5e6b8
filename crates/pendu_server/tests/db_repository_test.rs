//! Tests for database repository operations.

use chrono::{Duration, TimeZone, Utc};
use diesel::Connection;
use diesel::SqliteConnection;
use diesel_migrations::MigrationHarness;
use tempfile::NamedTempFile;

use pendu_core::{Achievement, Difficulty, GameResult, PlayerStats, StatsStore};
use pendu_server::{GameRepository, MIGRATIONS};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let mut conn = SqliteConnection::establish(&db_path).expect("Failed to connect");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Migrations failed");

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    (db_file, repo)
}

fn result(player: &str, won: bool, word: &str, difficulty: Difficulty, elapsed: f64) -> GameResult {
    GameResult {
        player_id: player.to_string(),
        won,
        secret_word: word.to_string(),
        word_length: word.chars().count() as u32,
        wrong_count: if won { 0 } else { difficulty.max_lives() },
        elapsed,
        lives: if won { difficulty.max_lives() } else { 0 },
        difficulty,
        hints_used: 0,
        language: "fr".to_string(),
    }
}

fn played(player: &str, games: &[(bool, &str, Difficulty, f64)]) -> PlayerStats {
    let start = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    let mut stats = PlayerStats::new(player);
    for (i, (won, word, difficulty, elapsed)) in games.iter().enumerate() {
        stats.fold(
            &result(player, *won, word, *difficulty, *elapsed),
            start + Duration::minutes(i as i64),
        );
    }
    stats
}

#[test]
fn test_create_player() {
    let (_db, repo) = setup_test_db();
    let player = repo
        .create_player("Alice".to_string(), "hash".to_string())
        .expect("Create failed");
    assert_eq!(player.name(), "Alice");
    assert_eq!(player.password_hash(), "hash");
    assert!(*player.id() > 0);
}

#[test]
fn test_create_player_duplicate_name_fails() {
    let (_db, repo) = setup_test_db();
    repo.create_player("Bob".to_string(), "hash".to_string())
        .expect("First create failed");
    let result = repo.create_player("Bob".to_string(), "other".to_string());
    assert!(result.is_err(), "Duplicate name should fail");
}

#[test]
fn test_get_player_found_and_missing() {
    let (_db, repo) = setup_test_db();
    repo.create_player("Carol".to_string(), "hash".to_string())
        .expect("Create failed");

    let found = repo.get_player("Carol").expect("Query failed");
    assert_eq!(found.expect("Player should exist").name(), "Carol");

    let missing = repo.get_player("NoSuchPlayer").expect("Query failed");
    assert!(missing.is_none());
}

#[test]
fn test_touch_login_unknown_player_fails() {
    let (_db, repo) = setup_test_db();
    assert!(repo.touch_login("ghost").is_err());
}

#[test]
fn test_empty_db_path_rejected() {
    assert!(GameRepository::new(String::new()).is_err());
}

#[test]
fn test_load_stats_missing_is_none() {
    let (_db, repo) = setup_test_db();
    let stats = repo.load_stats("nobody").expect("Query failed");
    assert!(stats.is_none());
}

#[test]
fn test_save_and_load_stats() {
    let (_db, repo) = setup_test_db();
    let mut stats = played(
        "dana",
        &[
            (true, "éléphant", Difficulty::Hard, 12.5),
            (false, "maison", Difficulty::Easy, 40.0),
            (true, "chat", Difficulty::Middle, 8.25),
        ],
    );
    stats.achievements.insert(Achievement::PerfectGame);

    repo.save_stats(&stats).expect("Save failed");
    let loaded = repo
        .load_stats("dana")
        .expect("Load failed")
        .expect("Stats should exist");

    assert_eq!(loaded, stats);
    assert_eq!(loaded.words_history.won.len(), 2);
    assert_eq!(loaded.words_history.won[0].word, "éléphant");
    assert_eq!(loaded.words_history.lost[0].word, "maison");
    assert_eq!(loaded.best_time, Some(8.25));
}

#[test]
fn test_resave_appends_only_new_history() {
    let (_db, repo) = setup_test_db();
    let mut stats = played("erin", &[(true, "chat", Difficulty::Easy, 5.0)]);
    repo.save_stats(&stats).expect("First save failed");
    repo.save_stats(&stats).expect("Second save failed");

    stats.fold(
        &result("erin", false, "maison", Difficulty::Hard, 30.0),
        Utc.with_ymd_and_hms(2026, 10, 2, 9, 0, 0).unwrap(),
    );
    repo.save_stats(&stats).expect("Third save failed");

    let loaded = repo
        .load_stats("erin")
        .expect("Load failed")
        .expect("Stats should exist");
    assert_eq!(loaded.games_played, 2);
    assert_eq!(loaded.words_history.won.len(), 1);
    assert_eq!(loaded.words_history.lost.len(), 1);
    assert_eq!(loaded.current_streak, 0);
}

#[test]
fn test_load_all_stats_keeps_insertion_order() {
    let (_db, repo) = setup_test_db();
    for name in ["zoe", "adam", "mila"] {
        let stats = played(name, &[(true, "chat", Difficulty::Easy, 3.0)]);
        repo.save_stats(&stats).expect("Save failed");
    }

    let all = repo.load_all_stats().expect("Load failed");
    let names: Vec<&str> = all.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(names, ["zoe", "adam", "mila"]);
    assert!(all.iter().all(|s| s.words_history.won.len() == 1));
}

#[test]
fn test_repository_as_stats_store() {
    let (_db, repo) = setup_test_db();
    let stats = played("finn", &[(false, "chat", Difficulty::Hard, 2.0)]);

    StatsStore::save(&repo, &stats).expect("Save failed");
    let loaded = StatsStore::load(&repo, "finn")
        .expect("Load failed")
        .expect("Stats should exist");
    assert_eq!(loaded.games_played, 1);
    assert_eq!(StatsStore::load_all(&repo).expect("List failed").len(), 1);
}
