//! Tests for account login, registration and migration.

use chrono::{TimeZone, Utc};
use tempfile::NamedTempFile;

use pendu_core::{Difficulty, GameResult, PlayerStats};
use pendu_server::{AuthError, AuthService, GameRepository, LoginStatus, hash_password};

fn setup_auth() -> (NamedTempFile, AuthService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = GameRepository::open(db_path).expect("Failed to open repository");
    (db_file, AuthService::new(repo))
}

#[test]
fn test_first_login_registers() {
    let (_db, auth) = setup_auth();
    let outcome = auth.login("Alice", "secret").expect("Login failed");
    assert_eq!(outcome.status, LoginStatus::Registered);
    assert_eq!(outcome.message, "New account created for Alice!");

    let player = auth
        .repository()
        .get_player("Alice")
        .expect("Query failed")
        .expect("Player should exist");
    assert_eq!(*player.password_hash(), hash_password("secret"));
}

#[test]
fn test_second_login_with_same_password() {
    let (_db, auth) = setup_auth();
    auth.login("Bob", "secret").expect("Register failed");
    let outcome = auth.login("  Bob ", "secret").expect("Login failed");
    assert_eq!(outcome.status, LoginStatus::LoggedIn);
    assert_eq!(outcome.message, "Welcome back Bob!");
}

#[test]
fn test_wrong_password_is_unauthorized() {
    let (_db, auth) = setup_auth();
    auth.login("Carol", "secret").expect("Register failed");
    let err = auth.login("Carol", "guess").expect_err("Wrong password accepted");
    assert!(matches!(err, AuthError::Unauthorized(ref m) if m == "Wrong password"));
}

#[test]
fn test_player_with_stats_is_migrated() {
    let (_db, auth) = setup_auth();
    let mut stats = PlayerStats::new("Dana");
    stats.fold(
        &GameResult {
            player_id: "Dana".to_string(),
            won: true,
            secret_word: "chat".to_string(),
            word_length: 4,
            wrong_count: 1,
            elapsed: 9.0,
            lives: 9,
            difficulty: Difficulty::Easy,
            hints_used: 0,
            language: "fr".to_string(),
        },
        Utc.with_ymd_and_hms(2026, 9, 30, 18, 0, 0).unwrap(),
    );
    auth.repository().save_stats(&stats).expect("Save failed");

    let outcome = auth.login("Dana", "secret").expect("Login failed");
    assert_eq!(outcome.status, LoginStatus::Migrated);

    let kept = auth
        .repository()
        .load_stats("Dana")
        .expect("Load failed")
        .expect("Stats should survive");
    assert_eq!(kept.games_won, 1);
}

#[test]
fn test_invalid_credentials_rejected() {
    let (_db, auth) = setup_auth();
    assert!(matches!(
        auth.login("x", "secret"),
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        auth.login("TheAdmin", "secret"),
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        auth.login("Erin", "ab"),
        Err(AuthError::Validation(_))
    ));
    assert!(
        auth.repository()
            .get_player("Erin")
            .expect("Query failed")
            .is_none()
    );
}

#[test]
fn test_authenticate_requires_account() {
    let (_db, auth) = setup_auth();
    let err = auth
        .authenticate("Finn", "secret")
        .expect_err("Unknown player accepted");
    assert!(matches!(err, AuthError::Unauthorized(ref m) if m == "Authentication required"));

    auth.login("Finn", "secret").expect("Register failed");
    let player = auth.authenticate("Finn", "secret").expect("Authenticate failed");
    assert_eq!(player.name(), "Finn");
    assert!(auth.authenticate("Finn", "nope").is_err());
}
