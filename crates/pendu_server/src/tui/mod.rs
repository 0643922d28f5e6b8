//! Terminal client for playing against the local services.

mod controller;
mod screen;
mod screens;

use std::io;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::Services;
use controller::ClientController;

/// Log file used while the terminal is in raw mode.
const TUI_LOG_FILE: &str = "pendu_tui.log";

/// Runs the terminal client until the player quits.
///
/// Logs go to `pendu_tui.log` so they do not corrupt the screen.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run_tui(services: Services) -> anyhow::Result<()> {
    let log_file = std::fs::File::create(TUI_LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,pendu_core=debug,pendu_server=debug")
            }),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Pendu TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = ClientController::new(services);
    let result = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "TUI exited with error");
    }
    info!("Pendu TUI stopped");
    result
}
