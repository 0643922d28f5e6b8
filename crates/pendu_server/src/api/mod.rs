//! REST API over the game service and the account store.

mod dto;
mod error;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use pendu_core::{GameService, HintVerdict, PlayerStats};
use tokio::task;
use tracing::{info, instrument};

use crate::messages::{guess_message, hint_message, start_message};
use crate::{AuthService, LoginOutcome};

pub use dto::{
    ErrorBody, GameResponse, GuessRequest, LeaderboardResponse, LoginRequest, StartRequest,
};
pub use error::ApiError;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    game: GameService,
    auth: AuthService,
}

impl AppState {
    /// Creates the state from its services.
    pub fn new(game: GameService, auth: AuthService) -> Self {
        Self { game, auth }
    }
}

/// Builds the API router.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    info!("Building API router");
    Router::new()
        .route("/api/player/login", post(login))
        .route("/api/game/start", post(start_game))
        .route("/api/game/guess", post(make_guess))
        .route("/api/stats/{player_name}", get(player_stats))
        .route("/api/leaderboard", get(leaderboard))
        .with_state(state)
}

/// Runs a synchronous service call on the blocking pool.
async fn run_blocking<T, F>(operation: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(operation)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

#[instrument(skip(state, request), fields(player = %request.player_name))]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, ApiError> {
    let outcome = run_blocking(move || {
        Ok(state.auth.login(&request.player_name, &request.password)?)
    })
    .await?;
    Ok(Json(outcome))
}

#[instrument(skip(state, request), fields(player = %request.player_name, difficulty = %request.difficulty))]
async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let session = run_blocking(move || {
        let player = state
            .auth
            .authenticate(&request.player_name, &request.password)?;

        let language = request
            .language
            .unwrap_or_else(|| state.game.words().default_language().to_string());
        Ok(state
            .game
            .start_session(player.name(), &request.difficulty, &language)?)
    })
    .await?;

    info!(game_id = %session.id(), "Game started");
    Ok(Json(GameResponse::new(&session, start_message(&session), None)))
}

/// Runs the hint path when requested. A refused hint answers at once; when
/// no letter is left to reveal the request falls through to the guess.
#[instrument(skip(state, request), fields(game_id = %request.game_id, hint = request.hint_requested))]
async fn make_guess(
    State(state): State<AppState>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let response = run_blocking(move || {
        if request.hint_requested {
            let turn = state.game.request_hint(&request.game_id)?;
            if turn.outcome.verdict != HintVerdict::NoHintAvailable {
                let message = hint_message(&turn.session, &turn.outcome);
                return Ok(GameResponse::new(
                    &turn.session,
                    message,
                    turn.stats.as_ref(),
                ));
            }
        }

        let turn = state.game.guess(&request.game_id, &request.guess)?;
        let message = guess_message(&turn.session, &turn.outcome, &request.guess);
        Ok(GameResponse::new(
            &turn.session,
            message,
            turn.stats.as_ref(),
        ))
    })
    .await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
async fn player_stats(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Result<Json<PlayerStats>, ApiError> {
    let stats = run_blocking(move || Ok(state.game.get_stats(&player_name)?)).await?;
    Ok(Json(stats))
}

#[instrument(skip(state))]
async fn leaderboard(State(state): State<AppState>) -> Result<Json<LeaderboardResponse>, ApiError> {
    let board = run_blocking(move || Ok(state.game.leaderboard()?)).await?;
    Ok(Json(board.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pendu_core::HangmanError;

    use super::*;

    #[tokio::test]
    async fn run_blocking_returns_value() {
        let value = run_blocking(|| Ok(21 * 2)).await.expect("operation succeeds");
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn run_blocking_passes_errors_through() {
        let err = run_blocking::<(), _>(|| Err(HangmanError::InvalidState.into()))
            .await
            .expect_err("operation fails");
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn run_blocking_maps_panic_to_internal_error() {
        let err = run_blocking::<(), _>(|| panic!("worker crashed"))
            .await
            .expect_err("panic is reported");
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
