//! SQLite persistence for player accounts and statistics.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use error::DbError;
pub use models::{
    HistoryOutcome, NewPlayer, NewWordHistory, Player, PlayerStatsRecord, PlayerStatsRow,
    WordHistoryRow,
};
pub use repository::GameRepository;

/// Schema migrations, applied by [`GameRepository::open`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
