//! Player statistics, streaks and achievements.

mod achievements;
mod engine;
mod model;

pub use achievements::{
    ACHIEVEMENTS, Achievement, AchievementRule, DIFFICULTY_STREAK, STREAK_LONG, STREAK_SHORT,
    VETERAN_GAMES, check_achievements,
};
pub use engine::{LEADERBOARD_SIZE, Leaderboard, StatsEngine, StatsUpdate, WINRATE_MIN_GAMES};
pub use model::{HistoryEntry, PlayerStats, WordsHistory};
