//! Folding finished games into stored statistics, and ranking players.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::stats::{Achievement, PlayerStats, check_achievements};
use crate::{GameResult, HangmanError, StatsStore};

/// Players listed per leaderboard category.
pub const LEADERBOARD_SIZE: usize = 5;

/// Games a player needs before appearing in the win-rate ranking.
pub const WINRATE_MIN_GAMES: u32 = 3;

/// Statistics after a finished game, with what it unlocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsUpdate {
    /// Updated statistics.
    pub stats: PlayerStats,
    /// Achievements unlocked by this game.
    pub new_achievements: Vec<Achievement>,
}

/// Top players by wins, win rate and fastest win.
///
/// Ties keep the order in which players were first recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Most games won.
    pub by_wins: Vec<PlayerStats>,
    /// Best win rate among players with enough games.
    pub by_winrate: Vec<PlayerStats>,
    /// Fastest single win.
    pub by_speed: Vec<PlayerStats>,
}

impl Leaderboard {
    /// Ranks `players`, given in insertion order.
    pub fn rank(players: &[PlayerStats]) -> Self {
        let mut by_wins: Vec<PlayerStats> = players.to_vec();
        by_wins.sort_by(|a, b| b.games_won.cmp(&a.games_won));
        by_wins.truncate(LEADERBOARD_SIZE);

        let mut by_winrate: Vec<PlayerStats> = players
            .iter()
            .filter(|s| s.games_played >= WINRATE_MIN_GAMES)
            .cloned()
            .collect();
        by_winrate.sort_by(|a, b| b.win_rate().total_cmp(&a.win_rate()));
        by_winrate.truncate(LEADERBOARD_SIZE);

        let mut by_speed: Vec<PlayerStats> = players
            .iter()
            .filter(|s| s.best_time.is_some())
            .cloned()
            .collect();
        by_speed.sort_by(|a, b| match (a.best_time, b.best_time) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        });
        by_speed.truncate(LEADERBOARD_SIZE);

        Self {
            by_wins,
            by_winrate,
            by_speed,
        }
    }
}

/// Statistics engine over a [`StatsStore`].
///
/// Each fold is a read-modify-write of one player's record and is not
/// atomic against another fold for the same player.
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<dyn StatsStore>,
}

impl std::fmt::Debug for StatsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsEngine").finish_non_exhaustive()
    }
}

impl StatsEngine {
    /// Creates an engine backed by `store`.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        info!("Creating StatsEngine");
        Self { store }
    }

    /// Folds one finished game into the player's statistics and persists
    /// them, creating a zeroed record for a new player.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`] if the store fails.
    #[instrument(skip(self, result), fields(player_id = %result.player_id, won = result.won))]
    pub fn fold_game_result(&self, result: &GameResult) -> Result<PlayerStats, HangmanError> {
        let mut stats = match self.store.load(&result.player_id)? {
            Some(stats) => stats,
            None => {
                info!("First game for player, creating stats");
                PlayerStats::new(result.player_id.clone())
            }
        };
        stats.fold(result, Utc::now());
        self.store.save(&stats)?;
        debug!(games_played = stats.games_played, "Stats saved");
        Ok(stats)
    }

    /// Folds a finished game, then evaluates achievements once.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`] if the store fails.
    #[instrument(skip(self, result), fields(player_id = %result.player_id))]
    pub fn record(&self, result: &GameResult) -> Result<StatsUpdate, HangmanError> {
        let mut stats = self.fold_game_result(result)?;
        let new_achievements = check_achievements(&mut stats);
        if !new_achievements.is_empty() {
            self.store.save(&stats)?;
        }
        Ok(StatsUpdate {
            stats,
            new_achievements,
        })
    }

    /// Returns a player's statistics.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::NotFound`] if the player never finished a
    /// game, or [`HangmanError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub fn get_stats(&self, player_id: &str) -> Result<PlayerStats, HangmanError> {
        self.store
            .load(player_id)?
            .ok_or_else(|| HangmanError::NotFound(player_id.to_string()))
    }

    /// Whether the player has any recorded statistics.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`] if the store fails.
    pub fn has_stats(&self, player_id: &str) -> Result<bool, HangmanError> {
        Ok(self.store.load(player_id)?.is_some())
    }

    /// Ranks every recorded player.
    ///
    /// # Errors
    ///
    /// Returns [`HangmanError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Result<Leaderboard, HangmanError> {
        let players = self.store.load_all()?;
        debug!(players = players.len(), "Ranking players");
        Ok(Leaderboard::rank(&players))
    }
}
