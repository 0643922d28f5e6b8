//! Screens of the terminal client.

mod in_game;
mod leaderboard;
mod login;
mod setup;
mod stats_view;
mod summary;

pub use in_game::InGameScreen;
pub use leaderboard::LeaderboardScreen;
pub use login::LoginScreen;
pub use setup::SetupScreen;
pub use stats_view::StatsViewScreen;
pub use summary::SummaryScreen;
