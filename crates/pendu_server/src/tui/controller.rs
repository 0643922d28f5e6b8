//! Client controller: the state machine driving the terminal screens.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::Services;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{
    InGameScreen, LeaderboardScreen, LoginScreen, SetupScreen, StatsViewScreen, SummaryScreen,
};

/// Active screen in the client state machine.
#[derive(Debug)]
enum ActiveScreen {
    Login(LoginScreen),
    Setup(SetupScreen),
    InGame(InGameScreen),
    Summary(SummaryScreen),
    StatsView(StatsViewScreen),
    Leaderboard(LeaderboardScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Setup(s) => s,
            Self::InGame(s) => s,
            Self::Summary(s) => s,
            Self::StatsView(s) => s,
            Self::Leaderboard(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Setup(s) => s,
            Self::InGame(s) => s,
            Self::Summary(s) => s,
            Self::StatsView(s) => s,
            Self::Leaderboard(s) => s,
        }
    }
}

/// Controller that owns the services and the logged-in player.
pub struct ClientController {
    services: Services,
    current_player: Option<String>,
}

impl ClientController {
    /// Creates a controller with nobody logged in.
    pub fn new(services: Services) -> Self {
        Self {
            services,
            current_player: None,
        }
    }

    /// Runs the event loop until the player quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting client event loop");

        let mut screen = ActiveScreen::Login(LoginScreen::new());

        loop {
            terminal.draw(|f| screen.as_screen().render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // crossterm fires both press and release on some platforms.
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = screen.as_screen_mut().handle_key(key, &self.services);
                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("Client quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        if !matches!(transition, ScreenTransition::Stay) {
            debug!(transition = ?transition, "Applying screen transition");
        }
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::LoggedIn { player } => {
                info!(player = %player, "Player logged in");
                self.current_player = Some(player.clone());
                Some(ActiveScreen::Setup(SetupScreen::new(player, &self.services)))
            }

            ScreenTransition::GoToSetup => Some(self.with_player(|player, services| {
                ActiveScreen::Setup(SetupScreen::new(player, services))
            })),

            ScreenTransition::GoToInGame { session } => {
                info!(session_id = %session.id(), "Navigating to InGame");
                Some(ActiveScreen::InGame(InGameScreen::new(*session)))
            }

            ScreenTransition::GoToSummary { session, update } => {
                info!(session_id = %session.id(), status = %session.status(), "Game finished");
                Some(ActiveScreen::Summary(SummaryScreen::new(*session, *update)))
            }

            ScreenTransition::GoToStats => Some(self.with_player(|player, services| {
                ActiveScreen::StatsView(StatsViewScreen::new(player, services))
            })),

            ScreenTransition::GoToLeaderboard => Some(ActiveScreen::Leaderboard(
                LeaderboardScreen::new(&self.services),
            )),

            ScreenTransition::Quit => None,
        }
    }

    /// Builds a screen for the logged-in player, or falls back to login.
    fn with_player(
        &self,
        build: impl FnOnce(String, &Services) -> ActiveScreen,
    ) -> ActiveScreen {
        match &self.current_player {
            Some(player) => build(player.clone(), &self.services),
            None => {
                warn!("No player logged in, redirecting to Login");
                ActiveScreen::Login(LoginScreen::new())
            }
        }
    }
}
