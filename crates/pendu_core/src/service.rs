//! Game operations over injected stores: start, guess, hint, stats.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::stats::{Leaderboard, PlayerStats, StatsEngine, StatsUpdate};
use crate::{
    Chooser, Difficulty, GameResult, GuessOutcome, HangmanError, HintOutcome,
    InMemorySessionStore, InMemoryStatsStore, Session, SessionStore, StatsStore,
    ThreadRngChooser, WordBank,
};

/// Outcome of a move, the session after it, and the statistics update if
/// the move finished the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn<O> {
    /// What the move did.
    pub outcome: O,
    /// Session after the move.
    pub session: Session,
    /// Present when the move finished the game.
    pub stats: Option<StatsUpdate>,
}

/// Entry point for playing games.
///
/// Callers must not run two moves on the same session concurrently.
#[derive(Clone)]
pub struct GameService {
    words: Arc<dyn WordBank>,
    sessions: Arc<dyn SessionStore>,
    stats: StatsEngine,
    chooser: Arc<dyn Chooser>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("default_language", &self.words.default_language())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl GameService {
    /// Creates a service from its collaborators.
    #[instrument(skip_all)]
    pub fn new(
        words: Arc<dyn WordBank>,
        sessions: Arc<dyn SessionStore>,
        stats: Arc<dyn StatsStore>,
        chooser: Arc<dyn Chooser>,
    ) -> Self {
        info!("Creating GameService");
        Self {
            words,
            sessions,
            stats: StatsEngine::new(stats),
            chooser,
        }
    }

    /// Creates a service with in-memory stores and random hints.
    pub fn in_memory(words: Arc<dyn WordBank>) -> Self {
        Self::new(
            words,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryStatsStore::new()),
            Arc::new(ThreadRngChooser),
        )
    }

    /// The statistics engine.
    pub fn stats(&self) -> &StatsEngine {
        &self.stats
    }

    /// The word bank.
    pub fn words(&self) -> &dyn WordBank {
        self.words.as_ref()
    }

    /// Starts a game for an authenticated player.
    ///
    /// `difficulty` is one of `easy`, `middle`, `hard`; `language` must be
    /// known to the word bank.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::InvalidDifficulty`],
    /// [`HangmanError::InvalidLanguage`], or [`HangmanError::Storage`].
    #[instrument(skip(self))]
    pub fn start_session(
        &self,
        player_id: &str,
        difficulty: &str,
        language: &str,
    ) -> Result<Session, HangmanError> {
        let difficulty = Difficulty::parse(difficulty)?;
        let secret = self.words.draw_word(difficulty, language)?;
        let id = Uuid::new_v4().to_string();

        let session = Session::new(
            id,
            player_id.to_string(),
            secret,
            difficulty,
            language.to_string(),
        );
        self.sessions.insert(session.clone())?;

        info!(session_id = %session.id(), %difficulty, "Game started");
        Ok(session)
    }

    /// Returns a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::SessionNotFound`] or [`HangmanError::Storage`].
    #[instrument(skip(self))]
    pub fn session(&self, session_id: &str) -> Result<Session, HangmanError> {
        self.sessions
            .get(session_id)?
            .ok_or_else(|| HangmanError::SessionNotFound(session_id.to_string()))
    }

    /// Drops a session from the store, returning it if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`].
    #[instrument(skip(self))]
    pub fn discard_session(&self, session_id: &str) -> Result<Option<Session>, HangmanError> {
        let session = self.sessions.remove(session_id)?;
        debug!(found = session.is_some(), "Session discarded");
        Ok(session)
    }

    /// Drops every session started more than `ttl` ago, finished or not.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`].
    #[instrument(skip(self), fields(ttl_secs = ttl.num_seconds()))]
    pub fn expire_sessions(&self, ttl: TimeDelta) -> Result<usize, HangmanError> {
        let Some(cutoff) = Utc::now().checked_sub_signed(ttl) else {
            return Ok(0);
        };
        let removed = self.sessions.remove_started_before(cutoff)?;
        if removed > 0 {
            info!(removed, "Expired sessions removed");
        }
        Ok(removed)
    }

    /// Submits a letter or whole-word guess.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::SessionNotFound`], [`HangmanError::InvalidState`]
    /// for a finished game, or [`HangmanError::Storage`].
    #[instrument(skip(self, text))]
    pub fn guess(&self, session_id: &str, text: &str) -> Result<Turn<GuessOutcome>, HangmanError> {
        let mut session = self.session(session_id)?;
        let outcome = session.guess(text)?;
        debug!(verdict = ?outcome.verdict, lives = outcome.lives, "Guess evaluated");
        self.commit(session, outcome.result.clone(), outcome)
    }

    /// Buys a hint.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::SessionNotFound`], [`HangmanError::InvalidState`]
    /// for a finished game, or [`HangmanError::Storage`].
    #[instrument(skip(self))]
    pub fn request_hint(&self, session_id: &str) -> Result<Turn<HintOutcome>, HangmanError> {
        let mut session = self.session(session_id)?;
        let outcome = session.request_hint(self.chooser.as_ref())?;
        debug!(verdict = ?outcome.verdict, lives = outcome.lives, "Hint evaluated");
        self.commit(session, outcome.result.clone(), outcome)
    }

    /// Stats are recorded before the session is stored. If recording fails
    /// the stored session keeps its previous state and the move can be
    /// replayed.
    fn commit<O>(
        &self,
        session: Session,
        result: Option<GameResult>,
        outcome: O,
    ) -> Result<Turn<O>, HangmanError> {
        let stats = result
            .map(|result| self.stats.record(&result))
            .transpose()?;
        self.sessions.update(session.clone())?;
        Ok(Turn {
            outcome,
            session,
            stats,
        })
    }

    /// Returns a player's statistics.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::NotFound`] or [`HangmanError::Storage`].
    pub fn get_stats(&self, player_id: &str) -> Result<PlayerStats, HangmanError> {
        self.stats.get_stats(player_id)
    }

    /// Top players by wins, win rate and speed.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`] if the store fails.
    pub fn leaderboard(&self) -> Result<Leaderboard, HangmanError> {
        self.stats.leaderboard()
    }
}
