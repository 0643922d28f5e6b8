//! Screen trait and transition type for the terminal client.

use crossterm::event::KeyEvent;
use pendu_core::{Session, StatsUpdate};
use ratatui::Frame;

use crate::Services;

/// The result of handling a key on a screen.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Logged in; go to the game setup.
    LoggedIn {
        /// Player name as stored.
        player: String,
    },
    /// Go to the game setup for the current player.
    GoToSetup,
    /// A game was started.
    GoToInGame {
        /// The new session.
        session: Box<Session>,
    },
    /// The game ended.
    GoToSummary {
        /// The finished session.
        session: Box<Session>,
        /// Statistics after the game.
        update: Box<StatsUpdate>,
    },
    /// Show the current player's statistics.
    GoToStats,
    /// Show the leaderboard.
    GoToLeaderboard,
    /// Exit the client.
    Quit,
}

/// Trait implemented by each screen of the client.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition;
}
