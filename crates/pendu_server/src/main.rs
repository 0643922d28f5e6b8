//! Pendu - hangman server and terminal client.

#![warn(missing_docs)]

mod cli;

use std::time::Duration;

use anyhow::Result;
use chrono::TimeDelta;
use clap::Parser;
use cli::{Cli, Command, StorageArgs};
use pendu_core::GameService;
use pendu_server::{AppState, LeaderboardResponse, ServerConfig, Services, router, run_tui};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,pendu_core=debug,pendu_server=debug";

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Serve {
            port,
            host,
            storage,
        } => {
            tracing_subscriber::fmt().with_env_filter(env_filter()).init();
            run_http_server(with_storage(config, host, port, storage)).await
        }
        Command::Play { storage } => {
            let services = Services::open(&with_storage(config, None, None, storage))?;
            run_tui(services).await
        }
        Command::Leaderboard { storage } => {
            init_stderr_logging();
            let services = Services::open(&with_storage(config, None, None, storage))?;
            let board = LeaderboardResponse::from(services.game.leaderboard()?);
            println!("{}", serde_json::to_string_pretty(&board)?);
            Ok(())
        }
        Command::Stats { player, storage } => {
            init_stderr_logging();
            let services = Services::open(&with_storage(config, None, None, storage))?;
            let stats = services.game.get_stats(player.trim())?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}

fn with_storage(
    config: ServerConfig,
    host: Option<String>,
    port: Option<u16>,
    storage: StorageArgs,
) -> ServerConfig {
    config.with_overrides(host, port, storage.db_path, storage.words_path)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// One-shot commands print JSON on stdout, so logs go to stderr.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Run the REST API server
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!("Starting Pendu HTTP server");

    let services = Services::open(&config)?;
    tokio::spawn(run_session_sweep(services.game.clone(), config.session_ttl()));
    let app = router(AppState::new(services.game, services.auth));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Drops sessions older than `ttl` once per sweep interval.
async fn run_session_sweep(game: GameService, ttl: TimeDelta) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);

    loop {
        interval.tick().await;
        if let Err(e) = game.expire_sessions(ttl) {
            warn!(error = %e, "Session sweep failed");
        }
    }
}
