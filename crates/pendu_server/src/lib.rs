//! Pendu server - REST API, terminal client and SQLite persistence for
//! the hangman game in [`pendu_core`].
//!
//! # Architecture
//!
//! - **Database**: player accounts, statistics and word history (diesel, SQLite)
//! - **Accounts**: name rules, password hashing, login and registration
//! - **API**: axum routes for login, games, statistics and leaderboard
//! - **TUI**: standalone ratatui client over the same services
//!
//! # Example
//!
//! ```no_run
//! use pendu_server::{AppState, ServerConfig, Services, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let services = Services::open(&config)?;
//! let app = router(AppState::new(services.game, services.auth));
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 8000)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod auth;
mod config;
mod db;
mod messages;
mod services;
mod tui;

// Crate-level exports - REST API
pub use api::{
    ApiError, AppState, ErrorBody, GameResponse, GuessRequest, LeaderboardResponse, LoginRequest,
    StartRequest, router,
};

// Crate-level exports - Accounts
pub use auth::{
    AuthError, AuthService, FORBIDDEN_WORDS, LoginOutcome, LoginStatus, NAME_MAX_CHARS,
    NAME_MIN_CHARS, PASSWORD_MIN_CHARS, hash_password, is_valid_player_name, validate_password,
    validate_player_name,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, ServerConfig};

// Crate-level exports - Database
pub use db::{DbError, GameRepository, HistoryOutcome, MIGRATIONS, Player};

// Crate-level exports - Messages and wiring
pub use messages::{guess_message, hint_message, start_message};
pub use services::Services;

// Crate-level exports - Terminal client
pub use tui::run_tui;
