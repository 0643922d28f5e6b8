//! Mapping of game and account errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error, From};
use pendu_core::HangmanError;
use tracing::{debug, error};

use crate::AuthError;
use crate::api::dto::ErrorBody;

/// Error returned by a REST handler.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// Game operation failed.
    #[display("{}", _0)]
    #[from]
    Game(HangmanError),
    /// Account operation failed.
    #[display("{}", _0)]
    #[from]
    Auth(AuthError),
    /// The worker running the operation panicked or was cancelled.
    #[display("Internal error: {}", _0)]
    Internal(#[error(not(source))] String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Game(HangmanError::InvalidDifficulty(_) | HangmanError::InvalidLanguage(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Game(HangmanError::InvalidState) => StatusCode::CONFLICT,
            Self::Game(HangmanError::SessionNotFound(_) | HangmanError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Game(HangmanError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(AuthError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "Request failed");
        } else {
            debug!(error = %self, %status, "Request refused");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
