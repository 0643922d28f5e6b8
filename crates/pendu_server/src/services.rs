//! Wiring of the game and account services from configuration.

use std::sync::Arc;

use pendu_core::{GameService, InMemorySessionStore, ThreadRngChooser, TomlWordBank};
use tracing::{info, instrument};

use crate::{AuthService, GameRepository, ServerConfig};

/// Game and account services over one database.
#[derive(Debug, Clone)]
pub struct Services {
    /// Game operations, statistics in SQLite.
    pub game: GameService,
    /// Player accounts.
    pub auth: AuthService,
}

impl Services {
    /// Opens the database, applies migrations and loads the word list.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or the word list cannot be loaded.
    #[instrument(skip(config), fields(db_path = %config.db_path()))]
    pub fn open(config: &ServerConfig) -> anyhow::Result<Self> {
        let repository = GameRepository::open(config.db_path().clone())?;

        let words = match config.words_path() {
            Some(path) => TomlWordBank::from_file(path, Arc::new(ThreadRngChooser))?,
            None => TomlWordBank::embedded()?,
        };
        info!(languages = ?pendu_core::WordBank::languages(&words), "Word bank ready");

        let game = GameService::new(
            Arc::new(words),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(repository.clone()),
            Arc::new(ThreadRngChooser),
        );
        let auth = AuthService::new(repository);

        Ok(Self { game, auth })
    }
}
