//! Player-facing messages shared by the REST API and the terminal client.

use pendu_core::{
    GuessOutcome, HintOutcome, HintVerdict, Rejection, Session, SessionStatus, Verdict,
};

/// Message opening a new game.
pub fn start_message(session: &Session) -> String {
    format!(
        "New game started! Word of {} letters (difficulty: {})",
        session.secret_word().chars().count(),
        session.difficulty()
    )
}

/// Message after a guess.
pub fn guess_message(session: &Session, outcome: &GuessOutcome, guess: &str) -> String {
    if let Some(message) = finish_message(session) {
        return message;
    }
    let guess = guess.trim();
    match outcome.verdict {
        Verdict::Correct => format!("✓ Good letter: {}", guess),
        Verdict::Incorrect if guess.chars().count() > 1 => {
            format!("✗ Wrong word: \"{}\"", guess)
        }
        Verdict::Incorrect => format!("✗ Wrong letter: {}", guess),
        Verdict::Rejected(Rejection::EmptyInput) => "You must type something!".to_string(),
        Verdict::Rejected(Rejection::NotALetter) => "Please enter a valid letter!".to_string(),
        Verdict::Rejected(Rejection::AlreadyTried) => {
            "You already tried this letter!".to_string()
        }
    }
}

/// Message after a hint request.
pub fn hint_message(session: &Session, outcome: &HintOutcome) -> String {
    if let Some(message) = finish_message(session) {
        return message;
    }
    match outcome.verdict {
        HintVerdict::Revealed { original, .. } => {
            format!("💡 HINT: the letter '{}' is in the word! (cost: 1 life)", original)
        }
        HintVerdict::NotEnoughLives => "❌ Not enough lives for a hint!".to_string(),
        HintVerdict::NoHintAvailable => "No letter left to reveal.".to_string(),
    }
}

fn finish_message(session: &Session) -> Option<String> {
    let time = session.elapsed().unwrap_or_default();
    match session.status() {
        SessionStatus::Won => Some(format!(
            "🎉 BRAVO! You found the word: {} (Time: {:.1}s)",
            session.secret_word(),
            time
        )),
        SessionStatus::Lost => Some(format!(
            "💀 LOST! The word was: {} (Time: {:.1}s)",
            session.secret_word(),
            time
        )),
        SessionStatus::Playing => None,
    }
}
