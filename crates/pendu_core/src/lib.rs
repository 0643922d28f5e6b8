//! Pendu core - hangman game sessions, scoring and player statistics.
//!
//! # Architecture
//!
//! - **Normalizer**: diacritic folding and word masking
//! - **Word bank**: secret words by language and difficulty
//! - **Session**: the per-game state machine (`Playing` → `Won` | `Lost`)
//! - **Stats**: cumulative per-player totals, streaks and achievements
//! - **Service**: the game operations over injected stores
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pendu_core::{GameService, TomlWordBank};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = GameService::in_memory(Arc::new(TomlWordBank::embedded()?));
//! let session = service.start_session("alice", "hard", "fr")?;
//! let turn = service.guess(session.id(), "e")?;
//! println!("{}", turn.outcome.word_display);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod chooser;
mod difficulty;
mod error;
mod normalize;
mod progress;
mod service;
mod session;
mod store;
mod words;

pub mod stats;

// Crate-level exports - Errors
pub use error::{HangmanError, StorageError};

// Crate-level exports - Text normalizer
pub use normalize::{MASK_CHAR, mask_word, normalize_character, normalize_word};

// Crate-level exports - Difficulty and progress policy
pub use difficulty::{Difficulty, DifficultyTally};
pub use progress::{
    CRYSTAL_CELLS, CountdownAlert, CrystalState, HINT_COST, HINT_RESERVED_LIVES, ProgressGauge,
    hint_allowed, is_lost,
};

// Crate-level exports - Randomness and word bank
pub use chooser::{Chooser, SequenceChooser, ThreadRngChooser};
pub use words::{DEFAULT_WORDS, LanguageWords, TomlWordBank, WordBank, WordListError};

// Crate-level exports - Session state machine
pub use session::{
    GameResult, GuessOutcome, HintOutcome, HintVerdict, PlayerId, Rejection, Session, SessionId,
    SessionStatus, Verdict,
};

// Crate-level exports - Stores and service
pub use service::{GameService, Turn};
pub use stats::{Achievement, Leaderboard, PlayerStats, StatsEngine, StatsUpdate};
pub use store::{InMemorySessionStore, InMemoryStatsStore, SessionStore, StatsStore};
