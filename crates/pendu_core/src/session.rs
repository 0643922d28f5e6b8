//! One hangman game: letters tried, lives, hints and status.
//!
//! A session starts `Playing` and ends `Won` or `Lost`. Once finished it
//! rejects every further guess or hint with [`HangmanError::InvalidState`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, instrument};

use crate::normalize::{is_complete, letter_positions, mask_word, normalize_character, normalize_word};
use crate::progress::{HINT_COST, ProgressGauge, hint_allowed, is_lost};
use crate::{Chooser, Difficulty, HangmanError};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Unique identifier for an authenticated player.
pub type PlayerId = String;

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Accepting guesses.
    Playing,
    /// Word found.
    Won,
    /// Out of lives.
    Lost,
}

impl SessionStatus {
    /// True for `Won` and `Lost`.
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Why a guess was refused without touching the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Nothing was typed.
    #[strum(to_string = "empty input")]
    EmptyInput,
    /// A single character that is not a playable letter.
    #[strum(to_string = "not a letter")]
    NotALetter,
    /// The letter was already found or already wrong.
    #[strum(to_string = "already tried")]
    AlreadyTried,
}

/// Result of evaluating one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// Letter in the word, or the whole word guessed.
    Correct,
    /// Letter or word wrong; one life lost.
    Incorrect,
    /// Refused, nothing changed.
    Rejected(Rejection),
}

/// Final tallies of a finished session, fed to the stats engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// Player who played the game.
    pub player_id: PlayerId,
    /// Whether the word was found.
    pub won: bool,
    /// The secret word, original spelling.
    pub secret_word: String,
    /// Characters in the secret word.
    pub word_length: u32,
    /// Distinct wrong letters tried.
    pub wrong_count: u32,
    /// Seconds from start to finish.
    pub elapsed: f64,
    /// Lives left at the end.
    pub lives: u32,
    /// Difficulty played.
    pub difficulty: Difficulty,
    /// Hints bought.
    pub hints_used: u32,
    /// Word bank language.
    pub language: String,
}

/// What a guess did to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// Evaluation of the guess.
    pub verdict: Verdict,
    /// Status after the guess.
    pub status: SessionStatus,
    /// Lives after the guess.
    pub lives: u32,
    /// Word as it should be displayed after the guess.
    pub word_display: String,
    /// Present when this guess finished the game.
    pub result: Option<GameResult>,
}

/// Result of asking for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintVerdict {
    /// A letter was revealed for one life.
    Revealed {
        /// Normalized letter added to the found set.
        letter: char,
        /// Its spelling in the secret word.
        original: char,
    },
    /// Refused: a hint must leave at least one life.
    NotEnoughLives,
    /// Every letter is already found.
    NoHintAvailable,
}

/// What a hint request did to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintOutcome {
    /// Evaluation of the request.
    pub verdict: HintVerdict,
    /// Status after the hint.
    pub status: SessionStatus,
    /// Lives after the hint.
    pub lives: u32,
    /// Hints bought so far.
    pub hints_used: u32,
    /// Word as it should be displayed after the hint.
    pub word_display: String,
    /// Present when this hint finished the game.
    pub result: Option<GameResult>,
}

/// A single game of hangman.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Session {
    id: SessionId,
    player_id: PlayerId,
    secret_word: String,
    secret_normalized: String,
    found_letters: BTreeSet<char>,
    wrong_letters: BTreeSet<char>,
    difficulty: Difficulty,
    lives: u32,
    hints_used: u32,
    status: SessionStatus,
    start_time: DateTime<Utc>,
    elapsed: Option<f64>,
    language: String,
}

impl Session {
    /// Starts a game on `secret_word` with full lives.
    #[instrument(skip(secret_word), fields(length = secret_word.chars().count()))]
    pub fn new(
        id: SessionId,
        player_id: PlayerId,
        secret_word: String,
        difficulty: Difficulty,
        language: String,
    ) -> Self {
        info!(session_id = %id, player_id = %player_id, "Creating new game session");
        let secret_normalized = normalize_word(&secret_word);
        Self {
            id,
            player_id,
            secret_word,
            secret_normalized,
            found_letters: BTreeSet::new(),
            wrong_letters: BTreeSet::new(),
            difficulty,
            lives: difficulty.max_lives(),
            hints_used: 0,
            status: SessionStatus::Playing,
            start_time: Utc::now(),
            elapsed: None,
            language,
        }
    }

    /// Lives granted at the start.
    pub fn max_lives(&self) -> u32 {
        self.difficulty.max_lives()
    }

    /// Lives spent so far, wrong guesses and hints together.
    pub fn errors_used(&self) -> u32 {
        self.max_lives() - self.lives
    }

    /// The word with unfound letters masked.
    pub fn masked_word(&self) -> String {
        mask_word(&self.secret_word, &self.found_letters)
    }

    /// The masked word while playing or lost, the full word once won.
    pub fn word_display(&self) -> String {
        match self.status {
            SessionStatus::Won => self.secret_word.clone(),
            _ => self.masked_word(),
        }
    }

    /// Lives indicator for the current state.
    pub fn gauge(&self) -> ProgressGauge {
        ProgressGauge::new(self.errors_used(), self.max_lives(), self.difficulty)
    }

    /// Evaluates a letter or whole-word guess.
    ///
    /// A single character is a letter guess; anything longer is a guess
    /// of the whole word. Empty input, non-letters and letters already
    /// tried are rejected with no state change.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::InvalidState`] if the session is finished.
    #[instrument(skip(self, input), fields(session_id = %self.id))]
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, HangmanError> {
        self.ensure_playing()?;

        let guess = input.trim().to_lowercase();
        let mut chars = guess.chars();
        let verdict = match (chars.next(), chars.next()) {
            (None, _) => Verdict::Rejected(Rejection::EmptyInput),
            (Some(c), None) => self.guess_letter(c),
            _ => self.guess_word(&guess),
        };

        let result = match verdict {
            Verdict::Rejected(reason) => {
                debug!(%reason, "Guess rejected");
                None
            }
            _ => self.settle(),
        };

        Ok(GuessOutcome {
            verdict,
            status: self.status,
            lives: self.lives,
            word_display: self.word_display(),
            result,
        })
    }

    fn guess_letter(&mut self, c: char) -> Verdict {
        if !c.is_alphabetic() {
            return Verdict::Rejected(Rejection::NotALetter);
        }
        let letter = match normalize_character(c) {
            Some(n) if n.is_ascii_lowercase() => n,
            _ => return Verdict::Rejected(Rejection::NotALetter),
        };
        if self.found_letters.contains(&letter) || self.wrong_letters.contains(&letter) {
            return Verdict::Rejected(Rejection::AlreadyTried);
        }

        if self.secret_normalized.contains(letter) {
            self.found_letters.insert(letter);
            debug!(%letter, "Correct letter");
            Verdict::Correct
        } else {
            self.wrong_letters.insert(letter);
            self.lose_life();
            debug!(%letter, lives = self.lives, "Wrong letter");
            Verdict::Incorrect
        }
    }

    fn guess_word(&mut self, guess: &str) -> Verdict {
        if normalize_word(guess) == self.secret_normalized {
            info!("Whole word found");
            self.status = SessionStatus::Won;
            Verdict::Correct
        } else {
            self.lose_life();
            debug!(lives = self.lives, "Wrong word");
            Verdict::Incorrect
        }
    }

    /// Buys a hint: reveals one unfound letter for one life.
    ///
    /// `chooser` picks uniformly among the unfound letter positions, so a
    /// letter that appears twice is twice as likely. `original` is the
    /// spelling at the picked position. Refused with no state change when
    /// a hint would leave no life in reserve.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::InvalidState`] if the session is finished.
    #[instrument(skip(self, chooser), fields(session_id = %self.id))]
    pub fn request_hint(&mut self, chooser: &dyn Chooser) -> Result<HintOutcome, HangmanError> {
        self.ensure_playing()?;

        let verdict = if !hint_allowed(self.lives) {
            debug!(lives = self.lives, "Hint refused");
            HintVerdict::NotEnoughLives
        } else {
            let unfound: Vec<(char, char)> = letter_positions(&self.secret_word)
                .into_iter()
                .filter(|(n, _)| !self.found_letters.contains(n))
                .collect();
            if unfound.is_empty() {
                HintVerdict::NoHintAvailable
            } else {
                let (letter, original) = unfound[chooser.pick(unfound.len())];
                self.found_letters.insert(letter);
                self.lives = self.lives.saturating_sub(HINT_COST);
                self.hints_used += 1;
                info!(%letter, lives = self.lives, hints_used = self.hints_used, "Hint given");
                HintVerdict::Revealed { letter, original }
            }
        };

        let result = match verdict {
            HintVerdict::Revealed { .. } => self.settle(),
            _ => None,
        };

        Ok(HintOutcome {
            verdict,
            status: self.status,
            lives: self.lives,
            hints_used: self.hints_used,
            word_display: self.word_display(),
            result,
        })
    }

    fn ensure_playing(&self) -> Result<(), HangmanError> {
        if self.status.is_finished() {
            debug!(status = %self.status, "Move on finished session");
            return Err(HangmanError::InvalidState);
        }
        Ok(())
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Applies the loss and completion checks right after a move and
    /// returns the final tallies if the game just ended.
    fn settle(&mut self) -> Option<GameResult> {
        if self.status == SessionStatus::Playing {
            if is_lost(self.lives) {
                self.status = SessionStatus::Lost;
            } else if is_complete(&self.secret_word, &self.found_letters) {
                self.status = SessionStatus::Won;
            }
        }
        if !self.status.is_finished() {
            return None;
        }

        let elapsed = (Utc::now() - self.start_time).num_milliseconds().max(0) as f64 / 1000.0;
        self.elapsed = Some(elapsed);
        info!(
            session_id = %self.id,
            status = %self.status,
            lives = self.lives,
            elapsed,
            "Game finished"
        );

        Some(GameResult {
            player_id: self.player_id.clone(),
            won: self.status == SessionStatus::Won,
            secret_word: self.secret_word.clone(),
            word_length: self.secret_word.chars().count() as u32,
            wrong_count: self.wrong_letters.len() as u32,
            elapsed,
            lives: self.lives,
            difficulty: self.difficulty,
            hints_used: self.hints_used,
            language: self.language.clone(),
        })
    }
}
