//! Error types for game and statistics operations.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// Storage error with location tracking.
///
/// Raised by a [`SessionStore`](crate::SessionStore) or
/// [`StatsStore`](crate::StatsStore) implementation and propagated unchanged.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StorageError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors surfaced by game operations.
///
/// Malformed guesses are not errors: they come back as a rejected verdict
/// and leave the session untouched.
#[derive(Debug, Clone, Display, Error, From)]
pub enum HangmanError {
    /// Difficulty name is not one of `easy`, `middle`, `hard`.
    #[display("Invalid difficulty: '{}'", _0)]
    InvalidDifficulty(#[error(not(source))] String),

    /// Language tag is not known to the word bank.
    #[display("Invalid language: '{}'", _0)]
    InvalidLanguage(#[error(not(source))] String),

    /// The session is finished and accepts no further moves.
    #[display("Game is finished")]
    InvalidState,

    /// No session with this id exists in the store.
    #[display("Game not found: '{}'", _0)]
    SessionNotFound(#[error(not(source))] String),

    /// No statistics exist for this player.
    #[display("Player not found: '{}'", _0)]
    NotFound(#[error(not(source))] String),

    /// Persistence collaborator failed.
    #[display("{}", _0)]
    #[from]
    Storage(StorageError),
}
