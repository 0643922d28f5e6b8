//! Cumulative per-player statistics.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::stats::Achievement;
use crate::{Difficulty, DifficultyTally, GameResult, PlayerId};

/// One finished word in a player's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The secret word, original spelling.
    pub word: String,
    /// Difficulty played.
    pub difficulty: Difficulty,
    /// Word bank language.
    pub language: String,
    /// Game duration in seconds.
    pub time: f64,
    /// Hints bought.
    pub hints_used: u32,
    /// When the game finished.
    pub timestamp: DateTime<Utc>,
}

/// Won and lost words, oldest first. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordsHistory {
    /// Words found.
    pub won: Vec<HistoryEntry>,
    /// Words missed.
    pub lost: Vec<HistoryEntry>,
}

/// Statistics accumulated over every finished game of one player.
///
/// Invariants: `games_won <= games_played` and
/// `total_words_found == games_won`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Owner.
    pub player_id: PlayerId,
    /// Finished games.
    pub games_played: u32,
    /// Games won.
    pub games_won: u32,
    /// Words found.
    pub total_words_found: u32,
    /// Wrong letters over all games.
    pub total_wrong_letters: u32,
    /// Hints over all games.
    pub total_hints: u32,
    /// Seconds played over all games.
    pub total_time: f64,
    /// Fastest win in seconds.
    pub best_time: Option<f64>,
    /// Longest word found, in characters.
    pub longest_word: u32,
    /// Games played per difficulty.
    pub difficulty_games: DifficultyTally,
    /// Consecutive wins.
    pub current_streak: u32,
    /// Longest run of consecutive wins.
    pub best_streak: u32,
    /// Consecutive wins per difficulty.
    pub difficulty_streaks: DifficultyTally,
    /// Longest run of consecutive wins per difficulty.
    pub best_difficulty_streaks: DifficultyTally,
    /// Unlocked achievements.
    pub achievements: BTreeSet<Achievement>,
    /// Every finished word.
    pub words_history: WordsHistory,
    /// When the last game finished.
    pub last_played: Option<DateTime<Utc>>,
    /// Whether the last game was won without a wrong letter.
    pub last_game_perfect: bool,
}

impl PlayerStats {
    /// Zeroed statistics for a new player.
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            games_played: 0,
            games_won: 0,
            total_words_found: 0,
            total_wrong_letters: 0,
            total_hints: 0,
            total_time: 0.0,
            best_time: None,
            longest_word: 0,
            difficulty_games: DifficultyTally::default(),
            current_streak: 0,
            best_streak: 0,
            difficulty_streaks: DifficultyTally::default(),
            best_difficulty_streaks: DifficultyTally::default(),
            achievements: BTreeSet::new(),
            words_history: WordsHistory::default(),
            last_played: None,
            last_game_perfect: false,
        }
    }

    /// Merges one finished game into the totals.
    ///
    /// A win extends the global streak and the streak of the played
    /// difficulty. A loss resets the global streak and the streaks of
    /// every difficulty, not only the one played.
    #[instrument(skip(self, result), fields(player_id = %self.player_id, won = result.won))]
    pub fn fold(&mut self, result: &GameResult, at: DateTime<Utc>) {
        self.games_played += 1;
        self.total_wrong_letters += result.wrong_count;
        self.total_time += result.elapsed;
        self.total_hints += result.hints_used;
        self.last_played = Some(at);
        self.last_game_perfect = result.won && result.wrong_count == 0;
        *self.difficulty_games.get_mut(result.difficulty) += 1;

        let entry = HistoryEntry {
            word: result.secret_word.clone(),
            difficulty: result.difficulty,
            language: result.language.clone(),
            time: result.elapsed,
            hints_used: result.hints_used,
            timestamp: at,
        };

        if result.won {
            self.games_won += 1;
            self.total_words_found += 1;
            self.longest_word = self.longest_word.max(result.word_length);

            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);

            let streak = self.difficulty_streaks.get_mut(result.difficulty);
            *streak += 1;
            let streak = *streak;
            let best = self.best_difficulty_streaks.get_mut(result.difficulty);
            *best = (*best).max(streak);

            self.best_time = Some(match self.best_time {
                Some(best) => best.min(result.elapsed),
                None => result.elapsed,
            });
            self.words_history.won.push(entry);
        } else {
            self.current_streak = 0;
            self.difficulty_streaks.reset();
            self.words_history.lost.push(entry);
        }

        debug!(
            games_played = self.games_played,
            games_won = self.games_won,
            current_streak = self.current_streak,
            "Game folded into stats"
        );
    }

    /// Games lost.
    pub fn games_lost(&self) -> u32 {
        self.games_played - self.games_won
    }

    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            (self.games_won as f64 / self.games_played as f64) * 100.0
        }
    }

    /// Mean game duration in seconds.
    pub fn average_time(&self) -> f64 {
        self.per_game(self.total_time)
    }

    /// Mean wrong letters per game.
    pub fn average_wrong_letters(&self) -> f64 {
        self.per_game(self.total_wrong_letters as f64)
    }

    /// Mean hints per game.
    pub fn average_hints(&self) -> f64 {
        self.per_game(self.total_hints as f64)
    }

    fn per_game(&self, total: f64) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            total / self.games_played as f64
        }
    }
}
