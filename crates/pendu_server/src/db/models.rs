//! Database models and their mapping to the game's statistics types.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use pendu_core::stats::{HistoryEntry, WordsHistory};
use pendu_core::{Achievement, Difficulty, DifficultyTally, PlayerStats};
use strum::{Display, EnumString};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Registered player account.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::players)]
pub struct Player {
    id: i32,
    name: String,
    password_hash: String,
    created_at: NaiveDateTime,
    last_login: NaiveDateTime,
}

/// Insertable player model for registering accounts.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayer {
    name: String,
    password_hash: String,
}

/// Which list of the word history a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryOutcome {
    /// Word found.
    Won,
    /// Word missed.
    Lost,
}

/// Stored statistics row, tallies and achievements as JSON text.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::player_stats)]
pub struct PlayerStatsRow {
    id: i32,
    player_name: String,
    games_played: i32,
    games_won: i32,
    total_words_found: i32,
    total_wrong_letters: i32,
    total_hints: i32,
    total_time: f64,
    best_time: Option<f64>,
    longest_word: i32,
    current_streak: i32,
    best_streak: i32,
    difficulty_games: String,
    difficulty_streaks: String,
    best_difficulty_streaks: String,
    achievements: String,
    last_played: Option<NaiveDateTime>,
    last_game_perfect: bool,
}

impl PlayerStatsRow {
    /// Player the row belongs to.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Rebuilds the statistics with the player's word history.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a JSON column is malformed.
    #[instrument(skip(self, words_history), fields(row_id = self.id, player = %self.player_name))]
    pub fn into_stats(self, words_history: WordsHistory) -> Result<PlayerStats, DbError> {
        let difficulty_games: DifficultyTally = serde_json::from_str(&self.difficulty_games)?;
        let difficulty_streaks: DifficultyTally = serde_json::from_str(&self.difficulty_streaks)?;
        let best_difficulty_streaks: DifficultyTally =
            serde_json::from_str(&self.best_difficulty_streaks)?;
        let achievements: BTreeSet<Achievement> = serde_json::from_str(&self.achievements)?;

        Ok(PlayerStats {
            player_id: self.player_name,
            games_played: from_column(self.games_played),
            games_won: from_column(self.games_won),
            total_words_found: from_column(self.total_words_found),
            total_wrong_letters: from_column(self.total_wrong_letters),
            total_hints: from_column(self.total_hints),
            total_time: self.total_time,
            best_time: self.best_time,
            longest_word: from_column(self.longest_word),
            difficulty_games,
            current_streak: from_column(self.current_streak),
            best_streak: from_column(self.best_streak),
            difficulty_streaks,
            best_difficulty_streaks,
            achievements,
            words_history,
            last_played: self.last_played.map(|t| t.and_utc()),
            last_game_perfect: self.last_game_perfect,
        })
    }
}

/// Column values written for one player's statistics.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = schema::player_stats)]
#[diesel(treat_none_as_null = true)]
pub struct PlayerStatsRecord {
    player_name: String,
    games_played: i32,
    games_won: i32,
    total_words_found: i32,
    total_wrong_letters: i32,
    total_hints: i32,
    total_time: f64,
    best_time: Option<f64>,
    longest_word: i32,
    current_streak: i32,
    best_streak: i32,
    difficulty_games: String,
    difficulty_streaks: String,
    best_difficulty_streaks: String,
    achievements: String,
    last_played: Option<NaiveDateTime>,
    last_game_perfect: bool,
}

impl PlayerStatsRecord {
    /// Flattens statistics into columns. The word history is stored
    /// separately.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a JSON column cannot be encoded.
    #[instrument(skip(stats), fields(player = %stats.player_id))]
    pub fn from_stats(stats: &PlayerStats) -> Result<Self, DbError> {
        Ok(Self {
            player_name: stats.player_id.clone(),
            games_played: to_column(stats.games_played),
            games_won: to_column(stats.games_won),
            total_words_found: to_column(stats.total_words_found),
            total_wrong_letters: to_column(stats.total_wrong_letters),
            total_hints: to_column(stats.total_hints),
            total_time: stats.total_time,
            best_time: stats.best_time,
            longest_word: to_column(stats.longest_word),
            current_streak: to_column(stats.current_streak),
            best_streak: to_column(stats.best_streak),
            difficulty_games: serde_json::to_string(&stats.difficulty_games)?,
            difficulty_streaks: serde_json::to_string(&stats.difficulty_streaks)?,
            best_difficulty_streaks: serde_json::to_string(&stats.best_difficulty_streaks)?,
            achievements: serde_json::to_string(&stats.achievements)?,
            last_played: stats.last_played.map(|t| t.naive_utc()),
            last_game_perfect: stats.last_game_perfect,
        })
    }
}

/// Stored word history row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::word_history)]
pub struct WordHistoryRow {
    id: i32,
    player_name: String,
    outcome: String,
    word: String,
    difficulty: String,
    language: String,
    time_secs: f64,
    hints_used: i32,
    played_at: NaiveDateTime,
}

impl WordHistoryRow {
    /// Parses the stored outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the outcome is not `won` or `lost`.
    pub fn parse_outcome(&self) -> Result<HistoryOutcome, DbError> {
        HistoryOutcome::from_str(&self.outcome)
            .map_err(|_| DbError::new(format!("Invalid outcome: '{}'", self.outcome)))
    }

    /// Converts the row into a history entry.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored difficulty is unknown.
    pub fn into_entry(self) -> Result<HistoryEntry, DbError> {
        let difficulty = Difficulty::from_str(&self.difficulty)
            .map_err(|_| DbError::new(format!("Invalid difficulty: '{}'", self.difficulty)))?;
        Ok(HistoryEntry {
            word: self.word,
            difficulty,
            language: self.language,
            time: self.time_secs,
            hints_used: from_column(self.hints_used),
            timestamp: self.played_at.and_utc(),
        })
    }
}

/// Insertable word history row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::word_history)]
pub struct NewWordHistory {
    player_name: String,
    outcome: String,
    word: String,
    difficulty: String,
    language: String,
    time_secs: f64,
    hints_used: i32,
    played_at: NaiveDateTime,
}

impl NewWordHistory {
    /// Builds the row for one history entry.
    pub fn new(player_name: &str, outcome: HistoryOutcome, entry: &HistoryEntry) -> Self {
        Self {
            player_name: player_name.to_string(),
            outcome: outcome.to_string(),
            word: entry.word.clone(),
            difficulty: entry.difficulty.to_string(),
            language: entry.language.clone(),
            time_secs: entry.time,
            hints_used: to_column(entry.hints_used),
            played_at: entry.timestamp.naive_utc(),
        }
    }
}

fn to_column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_column(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
