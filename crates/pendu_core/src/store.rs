//! Persistence collaborators and their in-memory implementations.
//!
//! Stores do not serialize concurrent callers: one mutation per session id
//! at a time, and one stats fold per player at a time, is the caller's
//! responsibility.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::{PlayerStats, Session, SessionId, StorageError};

/// Keyed storage for live and finished sessions.
pub trait SessionStore: Send + Sync {
    /// Adds a new session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the id is taken or the backend fails.
    fn insert(&self, session: Session) -> Result<(), StorageError>;

    /// Looks a session up by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn get(&self, id: &str) -> Result<Option<Session>, StorageError>;

    /// Replaces a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn update(&self, session: Session) -> Result<(), StorageError>;

    /// Evicts a session, returning it if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn remove(&self, id: &str) -> Result<Option<Session>, StorageError>;

    /// Evicts every session started at or before `cutoff`, returning how
    /// many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn remove_started_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError>;
}

/// Storage for player statistics.
pub trait StatsStore: Send + Sync {
    /// Loads one player's statistics.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn load(&self, player_id: &str) -> Result<Option<PlayerStats>, StorageError>;

    /// Writes one player's statistics, creating the record if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn save(&self, stats: &PlayerStats) -> Result<(), StorageError>;

    /// Loads every player's statistics in the order players were first saved.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend fails.
    fn load_all(&self) -> Result<Vec<PlayerStats>, StorageError>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|_| StorageError::new("In-memory store lock poisoned"))
}

/// Sessions kept in a shared map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self::default()
    }

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(lock(&self.sessions)?.len())
    }

    /// Whether the store holds no session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn insert(&self, session: Session) -> Result<(), StorageError> {
        let mut sessions = lock(&self.sessions)?;
        if sessions.contains_key(session.id()) {
            warn!("Session already exists");
            return Err(StorageError::new(format!(
                "Session '{}' already exists",
                session.id()
            )));
        }
        sessions.insert(session.id().clone(), session);
        debug!("Session stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &str) -> Result<Option<Session>, StorageError> {
        let session = lock(&self.sessions)?.get(id).cloned();
        if session.is_none() {
            debug!("Session not found");
        }
        Ok(session)
    }

    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn update(&self, session: Session) -> Result<(), StorageError> {
        lock(&self.sessions)?.insert(session.id().clone(), session);
        debug!("Session updated");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, id: &str) -> Result<Option<Session>, StorageError> {
        Ok(lock(&self.sessions)?.remove(id))
    }

    #[instrument(skip(self))]
    fn remove_started_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError> {
        let mut sessions = lock(&self.sessions)?;
        let before = sessions.len();
        sessions.retain(|_, session| *session.start_time() > cutoff);
        let removed = before - sessions.len();
        debug!(removed, remaining = sessions.len(), "Expired sessions evicted");
        Ok(removed)
    }
}

/// Statistics kept in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsStore {
    players: Arc<Mutex<Vec<PlayerStats>>>,
}

impl InMemoryStatsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for InMemoryStatsStore {
    fn load(&self, player_id: &str) -> Result<Option<PlayerStats>, StorageError> {
        Ok(lock(&self.players)?
            .iter()
            .find(|s| s.player_id == player_id)
            .cloned())
    }

    #[instrument(skip(self, stats), fields(player_id = %stats.player_id))]
    fn save(&self, stats: &PlayerStats) -> Result<(), StorageError> {
        let mut players = lock(&self.players)?;
        match players.iter_mut().find(|s| s.player_id == stats.player_id) {
            Some(existing) => *existing = stats.clone(),
            None => players.push(stats.clone()),
        }
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<PlayerStats>, StorageError> {
        Ok(lock(&self.players)?.clone())
    }
}
