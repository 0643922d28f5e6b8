//! Database repository for player accounts and statistics.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use pendu_core::stats::WordsHistory;
use pendu_core::{PlayerStats, StatsStore, StorageError};
use tracing::{debug, error, info, instrument};

use crate::db::{
    DbError, HistoryOutcome, MIGRATIONS, NewPlayer, NewWordHistory, Player, PlayerStatsRecord,
    PlayerStatsRow, WordHistoryRow, schema,
};

/// Concurrent writers wait this long for the database lock.
const BUSY_TIMEOUT_PRAGMA: &str = "PRAGMA busy_timeout = 5000";

/// Database repository for player and statistics operations.
///
/// Opens a fresh SQLite connection per call.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Creates a repository and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repository = Self::new(db_path)?;
        repository.run_migrations()?;
        Ok(repository)
    }

    /// Applies every pending migration.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })?;
        diesel::sql_query(BUSY_TIMEOUT_PRAGMA)
            .execute(&mut conn)
            .map_err(|e| DbError::new(format!("Failed to set busy timeout: {}", e)))?;
        Ok(conn)
    }

    /// Registers a player account.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the name is already taken or a database error occurs.
    #[instrument(skip(self, password_hash))]
    pub fn create_player(&self, name: String, password_hash: String) -> Result<Player, DbError> {
        debug!(name = %name, "Creating player");
        let mut conn = self.connection()?;

        let player = diesel::insert_into(schema::players::table)
            .values(&NewPlayer::new(name, password_hash))
            .returning(Player::as_returning())
            .get_result(&mut conn)?;

        info!(player_id = player.id(), name = %player.name(), "Player created");
        Ok(player)
    }

    /// Gets a player by name. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player(&self, name: &str) -> Result<Option<Player>, DbError> {
        let mut conn = self.connection()?;

        let player = schema::players::table
            .filter(schema::players::name.eq(name))
            .first::<Player>(&mut conn)
            .optional()?;

        debug!(found = player.is_some(), "Player lookup");
        Ok(player)
    }

    /// Stamps the player's last login with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the player does not exist or a database error occurs.
    #[instrument(skip(self))]
    pub fn touch_login(&self, name: &str) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let updated = diesel::update(schema::players::table.filter(schema::players::name.eq(name)))
            .set(schema::players::last_login.eq(chrono::Utc::now().naive_utc()))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(DbError::new(format!("Player '{}' does not exist", name)));
        }
        debug!("Last login updated");
        Ok(())
    }

    /// Loads one player's statistics with their word history.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn load_stats(&self, name: &str) -> Result<Option<PlayerStats>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::player_stats::table
            .filter(schema::player_stats::player_name.eq(name))
            .select(PlayerStatsRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            debug!("No stats recorded");
            return Ok(None);
        };

        let rows = schema::word_history::table
            .filter(schema::word_history::player_name.eq(name))
            .order(schema::word_history::id.asc())
            .select(WordHistoryRow::as_select())
            .load(&mut conn)?;

        let stats = row.into_stats(split_history(rows)?)?;
        debug!(games_played = stats.games_played, "Stats loaded");
        Ok(Some(stats))
    }

    /// Loads every player's statistics, in the order players were first saved.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn load_all_stats(&self) -> Result<Vec<PlayerStats>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::player_stats::table
            .order(schema::player_stats::id.asc())
            .select(PlayerStatsRow::as_select())
            .load(&mut conn)?;

        let history = schema::word_history::table
            .order(schema::word_history::id.asc())
            .select(WordHistoryRow::as_select())
            .load(&mut conn)?;

        let mut by_player: HashMap<String, Vec<WordHistoryRow>> = HashMap::new();
        for entry in history {
            by_player
                .entry(entry.player_name().clone())
                .or_default()
                .push(entry);
        }

        let stats = rows
            .into_iter()
            .map(|row| {
                let entries = by_player.remove(row.player_name()).unwrap_or_default();
                row.into_stats(split_history(entries)?)
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        info!(count = stats.len(), "All stats loaded");
        Ok(stats)
    }

    /// Writes a player's statistics in one transaction.
    ///
    /// History entries already stored are left untouched; only entries
    /// beyond the stored count are appended.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, stats), fields(player = %stats.player_id, games_played = stats.games_played))]
    pub fn save_stats(&self, stats: &PlayerStats) -> Result<(), DbError> {
        let record = PlayerStatsRecord::from_stats(stats)?;
        let mut conn = self.connection()?;

        conn.transaction::<_, DbError, _>(|conn| {
            let updated = diesel::update(
                schema::player_stats::table
                    .filter(schema::player_stats::player_name.eq(&stats.player_id)),
            )
            .set(&record)
            .execute(conn)?;

            if updated == 0 {
                diesel::insert_into(schema::player_stats::table)
                    .values(&record)
                    .execute(conn)?;
                debug!("Stats row created");
            }

            append_history(conn, &stats.player_id, HistoryOutcome::Won, &stats.words_history)?;
            append_history(conn, &stats.player_id, HistoryOutcome::Lost, &stats.words_history)?;
            Ok(())
        })?;

        info!("Stats saved");
        Ok(())
    }
}

fn append_history(
    conn: &mut SqliteConnection,
    player_name: &str,
    outcome: HistoryOutcome,
    history: &WordsHistory,
) -> Result<(), DbError> {
    let entries = match outcome {
        HistoryOutcome::Won => &history.won,
        HistoryOutcome::Lost => &history.lost,
    };

    let stored: i64 = schema::word_history::table
        .filter(schema::word_history::player_name.eq(player_name))
        .filter(schema::word_history::outcome.eq(outcome.to_string()))
        .count()
        .get_result(conn)?;
    let stored = usize::try_from(stored).unwrap_or(0);

    for entry in entries.iter().skip(stored) {
        diesel::insert_into(schema::word_history::table)
            .values(&NewWordHistory::new(player_name, outcome, entry))
            .execute(conn)?;
    }

    let appended = entries.len().saturating_sub(stored);
    if appended > 0 {
        debug!(%outcome, appended, "History appended");
    }
    Ok(())
}

fn split_history(rows: Vec<WordHistoryRow>) -> Result<WordsHistory, DbError> {
    let mut history = WordsHistory::default();
    for row in rows {
        match row.parse_outcome()? {
            HistoryOutcome::Won => history.won.push(row.into_entry()?),
            HistoryOutcome::Lost => history.lost.push(row.into_entry()?),
        }
    }
    Ok(history)
}

impl StatsStore for GameRepository {
    fn load(&self, player_id: &str) -> Result<Option<PlayerStats>, StorageError> {
        self.load_stats(player_id).map_err(|e| {
            error!(error = %e, "Failed to load stats");
            StorageError::from(e)
        })
    }

    fn save(&self, stats: &PlayerStats) -> Result<(), StorageError> {
        self.save_stats(stats).map_err(|e| {
            error!(error = %e, "Failed to save stats");
            StorageError::from(e)
        })
    }

    fn load_all(&self) -> Result<Vec<PlayerStats>, StorageError> {
        self.load_all_stats().map_err(|e| {
            error!(error = %e, "Failed to load all stats");
            StorageError::from(e)
        })
    }
}
