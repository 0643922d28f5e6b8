//! Achievement rules, evaluated uniformly after each finished game.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{info, instrument};

use crate::Difficulty;
use crate::stats::PlayerStats;

/// An unlockable achievement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
pub enum Achievement {
    /// Five wins in a row.
    #[serde(rename = "streak_5")]
    #[strum(serialize = "streak_5")]
    Streak5,
    /// Ten wins in a row.
    #[serde(rename = "streak_10")]
    #[strum(serialize = "streak_10")]
    Streak10,
    /// Three easy wins in a row.
    #[serde(rename = "easy_streak_3")]
    #[strum(serialize = "easy_streak_3")]
    EasyStreak3,
    /// Three middle wins in a row.
    #[serde(rename = "middle_streak_3")]
    #[strum(serialize = "middle_streak_3")]
    MiddleStreak3,
    /// Three hard wins in a row.
    #[serde(rename = "hard_streak_3")]
    #[strum(serialize = "hard_streak_3")]
    HardStreak3,
    /// Fifty games played.
    #[serde(rename = "veteran_50")]
    #[strum(serialize = "veteran_50")]
    Veteran50,
    /// A game won without any wrong letter.
    #[serde(rename = "perfect_game")]
    #[strum(serialize = "perfect_game")]
    PerfectGame,
}

/// A row of the achievement table.
#[derive(Debug, Clone, Copy)]
pub struct AchievementRule {
    /// Achievement granted.
    pub id: Achievement,
    /// Human-readable title.
    pub title: &'static str,
    /// Unlock condition.
    pub unlocked: fn(&PlayerStats) -> bool,
}

/// Streak length that unlocks the first streak achievement.
pub const STREAK_SHORT: u32 = 5;
/// Streak length that unlocks the second streak achievement.
pub const STREAK_LONG: u32 = 10;
/// Per-difficulty streak length that unlocks a difficulty achievement.
pub const DIFFICULTY_STREAK: u32 = 3;
/// Games played that unlock the veteran achievement.
pub const VETERAN_GAMES: u32 = 50;

fn difficulty_streak(stats: &PlayerStats, difficulty: Difficulty) -> bool {
    stats.best_difficulty_streaks.get(difficulty) >= DIFFICULTY_STREAK
}

fn short_streak(stats: &PlayerStats) -> bool {
    stats.best_streak >= STREAK_SHORT
}

fn long_streak(stats: &PlayerStats) -> bool {
    stats.best_streak >= STREAK_LONG
}

fn easy_streak(stats: &PlayerStats) -> bool {
    difficulty_streak(stats, Difficulty::Easy)
}

fn middle_streak(stats: &PlayerStats) -> bool {
    difficulty_streak(stats, Difficulty::Middle)
}

fn hard_streak(stats: &PlayerStats) -> bool {
    difficulty_streak(stats, Difficulty::Hard)
}

fn veteran(stats: &PlayerStats) -> bool {
    stats.games_played >= VETERAN_GAMES
}

fn perfect(stats: &PlayerStats) -> bool {
    stats.last_game_perfect
}

/// Every achievement and its rule.
pub const ACHIEVEMENTS: &[AchievementRule] = &[
    AchievementRule {
        id: Achievement::Streak5,
        title: "On a roll: 5 wins in a row",
        unlocked: short_streak,
    },
    AchievementRule {
        id: Achievement::Streak10,
        title: "Unstoppable: 10 wins in a row",
        unlocked: long_streak,
    },
    AchievementRule {
        id: Achievement::EasyStreak3,
        title: "Warming up: 3 easy wins in a row",
        unlocked: easy_streak,
    },
    AchievementRule {
        id: Achievement::MiddleStreak3,
        title: "Steady hand: 3 middle wins in a row",
        unlocked: middle_streak,
    },
    AchievementRule {
        id: Achievement::HardStreak3,
        title: "Nerves of steel: 3 hard wins in a row",
        unlocked: hard_streak,
    },
    AchievementRule {
        id: Achievement::Veteran50,
        title: "Veteran: 50 games played",
        unlocked: veteran,
    },
    AchievementRule {
        id: Achievement::PerfectGame,
        title: "Flawless: a word found without a wrong letter",
        unlocked: perfect,
    },
];

impl Achievement {
    /// Human-readable title from the rule table.
    pub fn title(self) -> &'static str {
        ACHIEVEMENTS
            .iter()
            .find(|rule| rule.id == self)
            .map_or("", |rule| rule.title)
    }
}

/// Unlocks every achievement whose rule now holds.
///
/// Returns only the achievements that were not already unlocked, in table
/// order. Running it again on the same stats unlocks nothing.
#[instrument(skip(stats), fields(player_id = %stats.player_id))]
pub fn check_achievements(stats: &mut PlayerStats) -> Vec<Achievement> {
    let current: &PlayerStats = stats;
    let unlocked: Vec<Achievement> = ACHIEVEMENTS
        .iter()
        .filter(|rule| !current.achievements.contains(&rule.id) && (rule.unlocked)(current))
        .map(|rule| rule.id)
        .collect();

    for id in &unlocked {
        info!(achievement = %id, "Achievement unlocked");
        stats.achievements.insert(*id);
    }
    unlocked
}
