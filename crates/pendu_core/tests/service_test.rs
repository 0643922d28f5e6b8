//! Tests for the game service operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::TimeDelta;
use pendu_core::{
    Achievement, GameService, HangmanError, HintVerdict, InMemorySessionStore,
    InMemoryStatsStore, PlayerStats, SequenceChooser, SessionStatus, StatsStore, StorageError,
    TomlWordBank, Verdict,
};

const WORDS: &str = r#"
default_language = "fr"

[languages.fr]
easy = ["maison"]
middle = ["éléphant"]
hard = ["chat"]

[languages.en]
easy = ["house"]
middle = ["elephant"]
hard = ["cat"]
"#;

fn service() -> GameService {
    service_with_stats(Arc::new(InMemoryStatsStore::new()))
}

fn service_with_stats(stats: Arc<dyn StatsStore>) -> GameService {
    let bank = TomlWordBank::from_toml_str(WORDS, Arc::new(SequenceChooser::new(vec![0])))
        .expect("word list loads");
    GameService::new(
        Arc::new(bank),
        Arc::new(InMemorySessionStore::new()),
        stats,
        Arc::new(SequenceChooser::new(vec![0])),
    )
}

/// Stats store whose writes fail while `failing` is set.
#[derive(Default)]
struct FlakyStatsStore {
    inner: InMemoryStatsStore,
    failing: AtomicBool,
}

impl StatsStore for FlakyStatsStore {
    fn load(&self, player_id: &str) -> Result<Option<PlayerStats>, StorageError> {
        self.inner.load(player_id)
    }

    fn save(&self, stats: &PlayerStats) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::new("disk full"));
        }
        self.inner.save(stats)
    }

    fn load_all(&self) -> Result<Vec<PlayerStats>, StorageError> {
        self.inner.load_all()
    }
}

#[test]
fn test_start_session_draws_from_bank() {
    let service = service();
    let session = service
        .start_session("alice", "hard", "fr")
        .expect("session starts");

    assert_eq!(session.secret_word(), "chat");
    assert_eq!(*session.lives(), 3);
    assert_eq!(*session.status(), SessionStatus::Playing);
    assert_eq!(session.player_id(), "alice");

    let stored = service.session(session.id()).expect("session stored");
    assert_eq!(stored, session);
}

#[test]
fn test_start_session_accepts_mixed_case_difficulty() {
    let service = service();
    let session = service
        .start_session("alice", " Middle ", "en")
        .expect("session starts");
    assert_eq!(session.secret_word(), "elephant");
    assert_eq!(*session.lives(), 6);
}

#[test]
fn test_session_ids_are_unique() {
    let service = service();
    let first = service.start_session("alice", "easy", "fr").expect("starts");
    let second = service.start_session("alice", "easy", "fr").expect("starts");
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_start_session_rejects_unknown_difficulty() {
    let service = service();
    let result = service.start_session("alice", "insane", "fr");
    assert!(matches!(
        result,
        Err(HangmanError::InvalidDifficulty(name)) if name == "insane"
    ));
}

#[test]
fn test_start_session_rejects_unknown_language() {
    let service = service();
    let result = service.start_session("alice", "easy", "de");
    assert!(matches!(
        result,
        Err(HangmanError::InvalidLanguage(tag)) if tag == "de"
    ));
}

#[test]
fn test_guess_unknown_session() {
    let service = service();
    assert!(matches!(
        service.guess("missing", "a"),
        Err(HangmanError::SessionNotFound(id)) if id == "missing"
    ));
    assert!(matches!(
        service.request_hint("missing"),
        Err(HangmanError::SessionNotFound(_))
    ));
}

#[test]
fn test_guess_is_persisted() {
    let service = service();
    let session = service.start_session("alice", "hard", "fr").expect("starts");

    let turn = service.guess(session.id(), "z").expect("guess accepted");
    assert_eq!(turn.outcome.verdict, Verdict::Incorrect);
    assert!(turn.stats.is_none());

    let stored = service.session(session.id()).expect("session stored");
    assert_eq!(*stored.lives(), 2);
    assert!(stored.wrong_letters().contains(&'z'));
}

#[test]
fn test_loss_folds_into_stats() {
    let service = service();
    let session = service.start_session("bob", "hard", "fr").expect("starts");

    for letter in ["x", "y"] {
        let turn = service.guess(session.id(), letter).expect("guess accepted");
        assert!(turn.stats.is_none());
    }
    let turn = service.guess(session.id(), "z").expect("guess accepted");
    assert_eq!(turn.outcome.status, SessionStatus::Lost);

    let update = turn.stats.expect("finished game updates stats");
    assert_eq!(update.stats.games_played, 1);
    assert_eq!(update.stats.games_won, 0);
    assert_eq!(update.stats.total_wrong_letters, 3);
    assert_eq!(update.stats.words_history.lost[0].word, "chat");
    assert!(update.new_achievements.is_empty());

    let stats = service.get_stats("bob").expect("stats exist");
    assert_eq!(stats, update.stats);
}

#[test]
fn test_finished_session_refuses_moves() {
    let service = service();
    let session = service.start_session("alice", "hard", "fr").expect("starts");
    let turn = service.guess(session.id(), "CHAT").expect("guess accepted");
    assert_eq!(turn.outcome.status, SessionStatus::Won);

    assert!(matches!(
        service.guess(session.id(), "a"),
        Err(HangmanError::InvalidState)
    ));
    assert!(matches!(
        service.request_hint(session.id()),
        Err(HangmanError::InvalidState)
    ));

    let stats = service.get_stats("alice").expect("stats exist");
    assert_eq!(stats.games_played, 1);
}

#[test]
fn test_perfect_win_unlocks_achievement() {
    let service = service();
    let session = service.start_session("carol", "hard", "fr").expect("starts");
    let turn = service.guess(session.id(), "chat").expect("guess accepted");

    let update = turn.stats.expect("finished game updates stats");
    assert_eq!(update.new_achievements, vec![Achievement::PerfectGame]);
    assert_eq!(update.stats.best_time, Some(update.stats.total_time));
}

#[test]
fn test_hint_through_service() {
    let service = service();
    let session = service.start_session("dave", "easy", "fr").expect("starts");

    let turn = service.request_hint(session.id()).expect("hint accepted");
    assert_eq!(
        turn.outcome.verdict,
        HintVerdict::Revealed {
            letter: 'm',
            original: 'm'
        }
    );
    assert_eq!(turn.outcome.word_display, "m_____");
    assert_eq!(*turn.session.hints_used(), 1);

    let stored = service.session(session.id()).expect("session stored");
    assert_eq!(*stored.lives(), 9);
}

#[test]
fn test_stats_unknown_player() {
    let service = service();
    assert!(matches!(
        service.get_stats("ghost"),
        Err(HangmanError::NotFound(name)) if name == "ghost"
    ));
}

#[test]
fn test_leaderboard_reflects_finished_games() {
    let service = service();
    for player in ["erin", "fred"] {
        let session = service.start_session(player, "hard", "fr").expect("starts");
        service.guess(session.id(), "chat").expect("guess accepted");
    }
    let session = service.start_session("fred", "hard", "fr").expect("starts");
    service.guess(session.id(), "chat").expect("guess accepted");

    let board = service.leaderboard().expect("leaderboard builds");
    let names: Vec<&str> = board.by_wins.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(names, ["fred", "erin"]);
    assert!(board.by_winrate.is_empty());
    assert_eq!(board.by_speed.len(), 2);
}

#[test]
fn test_failed_stats_write_leaves_move_replayable() {
    let store = Arc::new(FlakyStatsStore::default());
    let service = service_with_stats(store.clone());
    let session = service.start_session("gus", "hard", "fr").expect("starts");
    service.guess(session.id(), "x").expect("guess accepted");
    service.guess(session.id(), "y").expect("guess accepted");

    store.failing.store(true, Ordering::SeqCst);
    assert!(matches!(
        service.guess(session.id(), "z"),
        Err(HangmanError::Storage(_))
    ));

    let stored = service.session(session.id()).expect("session stored");
    assert_eq!(*stored.status(), SessionStatus::Playing);
    assert_eq!(*stored.lives(), 1);
    assert!(matches!(
        service.get_stats("gus"),
        Err(HangmanError::NotFound(_))
    ));

    store.failing.store(false, Ordering::SeqCst);
    let turn = service.guess(session.id(), "z").expect("guess accepted");
    assert_eq!(turn.outcome.status, SessionStatus::Lost);
    let stats = service.get_stats("gus").expect("stats exist");
    assert_eq!(stats.games_played, 1);
}

#[test]
fn test_discard_session() {
    let service = service();
    let session = service.start_session("hana", "easy", "fr").expect("starts");

    let removed = service
        .discard_session(session.id())
        .expect("discard succeeds");
    assert_eq!(removed, Some(session.clone()));
    assert!(matches!(
        service.session(session.id()),
        Err(HangmanError::SessionNotFound(_))
    ));
    assert_eq!(
        service
            .discard_session(session.id())
            .expect("discard succeeds"),
        None
    );
}

#[test]
fn test_expire_sessions_by_age() {
    let service = service();
    let live = service.start_session("ivan", "easy", "fr").expect("starts");
    let finished = service.start_session("ivan", "hard", "fr").expect("starts");
    service
        .guess(finished.id(), "chat")
        .expect("guess accepted");

    let removed = service
        .expire_sessions(TimeDelta::hours(1))
        .expect("sweep succeeds");
    assert_eq!(removed, 0);
    let removed = service
        .expire_sessions(TimeDelta::MAX)
        .expect("sweep succeeds");
    assert_eq!(removed, 0);
    assert!(service.session(live.id()).is_ok());

    let removed = service
        .expire_sessions(TimeDelta::zero())
        .expect("sweep succeeds");
    assert_eq!(removed, 2);
    for id in [live.id(), finished.id()] {
        assert!(matches!(
            service.session(id),
            Err(HangmanError::SessionNotFound(_))
        ));
    }
    assert_eq!(service.get_stats("ivan").expect("stats kept").games_won, 1);
}
