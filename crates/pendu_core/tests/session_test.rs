//! Tests for the game session state machine.

use std::sync::Mutex;

use pendu_core::{
    Chooser, Difficulty, HangmanError, HintVerdict, Rejection, SequenceChooser, Session, SessionStatus,
    Verdict,
};

fn session(word: &str, difficulty: Difficulty) -> Session {
    Session::new(
        "game_1".to_string(),
        "alice".to_string(),
        word.to_string(),
        difficulty,
        "fr".to_string(),
    )
}

#[test]
fn test_new_session_has_full_lives() {
    let game = session("chat", Difficulty::Hard);
    assert_eq!(*game.lives(), 3);
    assert_eq!(game.max_lives(), 3);
    assert_eq!(*game.status(), SessionStatus::Playing);
    assert_eq!(game.masked_word(), "____");
    assert_eq!(game.secret_normalized(), "chat");
}

#[test]
fn test_hard_scenario_whole_word_wins() {
    let mut game = session("Chat", Difficulty::Hard);

    let outcome = game.guess("z").expect("guess accepted");
    assert_eq!(outcome.verdict, Verdict::Incorrect);
    assert_eq!(outcome.lives, 2);

    let outcome = game.guess("c").expect("guess accepted");
    assert_eq!(outcome.verdict, Verdict::Correct);
    assert_eq!(game.found_letters().iter().collect::<String>(), "c");

    game.guess("h").expect("guess accepted");
    assert_eq!(game.found_letters().iter().collect::<String>(), "ch");

    let outcome = game.guess("chat").expect("guess accepted");
    assert_eq!(outcome.verdict, Verdict::Correct);
    assert_eq!(outcome.status, SessionStatus::Won);
    assert_eq!(outcome.lives, 2);

    let result = outcome.result.expect("finished game has a result");
    assert!(result.won);
    assert_eq!(result.secret_word, "Chat");
    assert_eq!(result.lives, 2);
    assert_eq!(result.wrong_count, 1);
    assert_eq!(outcome.word_display, "Chat");
}

#[test]
fn test_whole_word_wins_without_any_letter() {
    let mut game = session("éléphant", Difficulty::Middle);
    let outcome = game.guess("ELEPHANT").expect("guess accepted");
    assert_eq!(outcome.status, SessionStatus::Won);
    assert!(game.found_letters().is_empty());
    assert_eq!(
        outcome.result.map(|r| r.secret_word).as_deref(),
        Some("éléphant")
    );
}

#[test]
fn test_easy_three_wrong_letters() {
    let mut game = session("maison", Difficulty::Easy);
    for letter in ["x", "y", "z"] {
        let outcome = game.guess(letter).expect("guess accepted");
        assert_eq!(outcome.verdict, Verdict::Incorrect);
    }
    assert_eq!(*game.lives(), 7);
    assert_eq!(*game.status(), SessionStatus::Playing);
    assert_eq!(game.errors_used(), 3);
}

#[test]
fn test_loss_is_immediate_and_hint_refused_on_last_life() {
    let mut game = session("chat", Difficulty::Hard);
    game.guess("x").expect("guess accepted");
    game.guess("y").expect("guess accepted");
    assert_eq!(*game.lives(), 1);

    let hint = game
        .request_hint(&SequenceChooser::new(vec![0]))
        .expect("hint call accepted");
    assert_eq!(hint.verdict, HintVerdict::NotEnoughLives);
    assert_eq!(hint.lives, 1);
    assert_eq!(*game.hints_used(), 0);

    let outcome = game.guess("z").expect("guess accepted");
    assert_eq!(outcome.lives, 0);
    assert_eq!(outcome.status, SessionStatus::Lost);
    let result = outcome.result.expect("finished game has a result");
    assert!(!result.won);
    assert_eq!(result.secret_word, "chat");
    assert_eq!(outcome.word_display, "____");
}

#[test]
fn test_letter_by_letter_completion() {
    let mut game = session("arc-en-ciel", Difficulty::Middle);
    for letter in ["a", "r", "c", "e", "n", "i"] {
        let outcome = game.guess(letter).expect("guess accepted");
        assert_eq!(outcome.status, SessionStatus::Playing);
    }
    let outcome = game.guess("l").expect("guess accepted");
    assert_eq!(outcome.status, SessionStatus::Won);
    assert_eq!(outcome.word_display, "arc-en-ciel");
    assert!(outcome.result.is_some());
}

#[test]
fn test_accented_guess_matches_plain_letter() {
    let mut game = session("forêt", Difficulty::Easy);
    let outcome = game.guess("Ê").expect("guess accepted");
    assert_eq!(outcome.verdict, Verdict::Correct);
    assert_eq!(outcome.word_display, "___ê_");

    let outcome = game.guess("e").expect("guess accepted");
    assert_eq!(outcome.verdict, Verdict::Rejected(Rejection::AlreadyTried));
}

#[test]
fn test_rejections_leave_state_unchanged() {
    let mut game = session("chat", Difficulty::Hard);
    game.guess("x").expect("guess accepted");
    let before = game.clone();

    for (input, reason) in [
        ("   ", Rejection::EmptyInput),
        ("7", Rejection::NotALetter),
        ("-", Rejection::NotALetter),
        ("x", Rejection::AlreadyTried),
        ("X", Rejection::AlreadyTried),
    ] {
        let outcome = game.guess(input).expect("guess accepted");
        assert_eq!(outcome.verdict, Verdict::Rejected(reason), "input {input:?}");
    }

    assert_eq!(game, before);
}

#[test]
fn test_wrong_word_costs_one_life() {
    let mut game = session("chat", Difficulty::Middle);
    let outcome = game.guess("chien").expect("guess accepted");
    assert_eq!(outcome.verdict, Verdict::Incorrect);
    assert_eq!(outcome.lives, 5);
    assert!(game.wrong_letters().is_empty());
    assert_eq!(outcome.word_display, "____");
}

#[test]
fn test_finished_session_rejects_moves() {
    let mut game = session("chat", Difficulty::Hard);
    game.guess("chat").expect("guess accepted");

    assert!(matches!(game.guess("c"), Err(HangmanError::InvalidState)));
    assert!(matches!(
        game.request_hint(&SequenceChooser::new(vec![0])),
        Err(HangmanError::InvalidState)
    ));
}

#[test]
fn test_hint_reveals_chosen_letter() {
    let mut game = session("Chat", Difficulty::Easy);
    game.guess("c").expect("guess accepted");

    // Unfound letters in order of appearance: h, a, t.
    let outcome = game
        .request_hint(&SequenceChooser::new(vec![1]))
        .expect("hint accepted");
    assert_eq!(
        outcome.verdict,
        HintVerdict::Revealed {
            letter: 'a',
            original: 'a'
        }
    );
    assert_eq!(outcome.lives, 9);
    assert_eq!(outcome.hints_used, 1);
    assert_eq!(outcome.word_display, "C_a_");
    assert!(game.found_letters().contains(&'a'));
}

#[test]
fn test_hint_can_complete_the_word() {
    let mut game = session("été", Difficulty::Easy);
    game.guess("e").expect("guess accepted");

    let outcome = game
        .request_hint(&SequenceChooser::new(vec![0]))
        .expect("hint accepted");
    assert_eq!(
        outcome.verdict,
        HintVerdict::Revealed {
            letter: 't',
            original: 't'
        }
    );
    assert_eq!(outcome.status, SessionStatus::Won);
    let result = outcome.result.expect("finished game has a result");
    assert_eq!(result.hints_used, 1);
    assert_eq!(result.lives, 9);
}

#[test]
fn test_hint_reports_original_spelling() {
    let mut game = session("Été", Difficulty::Easy);
    let outcome = game
        .request_hint(&SequenceChooser::new(vec![0]))
        .expect("hint accepted");
    assert_eq!(
        outcome.verdict,
        HintVerdict::Revealed {
            letter: 'e',
            original: 'É'
        }
    );
    assert_eq!(outcome.word_display, "É_é");
}

/// Records every range it is asked to pick from and always picks `index`.
struct RecordingChooser {
    index: usize,
    ranges: Mutex<Vec<usize>>,
}

impl RecordingChooser {
    fn new(index: usize) -> Self {
        Self {
            index,
            ranges: Mutex::new(Vec::new()),
        }
    }

    fn ranges(&self) -> Vec<usize> {
        self.ranges.lock().expect("lock poisoned").clone()
    }
}

impl Chooser for RecordingChooser {
    fn pick(&self, len: usize) -> usize {
        self.ranges.lock().expect("lock poisoned").push(len);
        self.index
    }
}

#[test]
fn test_hint_weighs_repeated_letters() {
    let mut game = session("banana", Difficulty::Easy);
    let chooser = RecordingChooser::new(3);

    let outcome = game.request_hint(&chooser).expect("hint accepted");

    // One candidate per unfound position: b, a, n, a, n, a.
    assert_eq!(chooser.ranges(), vec![6]);
    assert_eq!(
        outcome.verdict,
        HintVerdict::Revealed {
            letter: 'a',
            original: 'a'
        }
    );
    assert_eq!(outcome.word_display, "_a_a_a");
}

#[test]
fn test_hint_skips_found_positions() {
    let mut game = session("banana", Difficulty::Easy);
    game.guess("a").expect("guess accepted");
    let chooser = RecordingChooser::new(2);

    let outcome = game.request_hint(&chooser).expect("hint accepted");

    assert_eq!(chooser.ranges(), vec![3]);
    assert_eq!(
        outcome.verdict,
        HintVerdict::Revealed {
            letter: 'n',
            original: 'n'
        }
    );
    assert_eq!(outcome.word_display, "_anana");
}

#[test]
fn test_hint_reports_spelling_at_picked_position() {
    let mut game = session("Élevé", Difficulty::Easy);
    let outcome = game
        .request_hint(&SequenceChooser::new(vec![4]))
        .expect("hint accepted");
    assert_eq!(
        outcome.verdict,
        HintVerdict::Revealed {
            letter: 'e',
            original: 'é'
        }
    );
    assert_eq!(outcome.word_display, "É_e_é");
}

#[test]
fn test_lives_stay_in_bounds() {
    let mut game = session("kiwi", Difficulty::Hard);
    let chooser = SequenceChooser::new(vec![0]);
    let moves = ["a", "hint", "b", "hint", "c", "d"];
    for step in moves {
        if game.status().is_finished() {
            break;
        }
        if step == "hint" {
            game.request_hint(&chooser).expect("hint accepted");
        } else {
            game.guess(step).expect("guess accepted");
        }
        assert!(*game.lives() <= game.max_lives());
    }
    assert_eq!(*game.status(), SessionStatus::Lost);
    assert_eq!(*game.lives(), 0);
}

#[test]
fn test_gauge_follows_lives() {
    let mut game = session("chat", Difficulty::Hard);
    game.guess("z").expect("guess accepted");
    assert_eq!(game.gauge().remaining(), 2);
}
