use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;

/// Transport-level failures. Envelope-level outcomes (no data, duplicates)
/// never pass through here; see [`crate::response::Envelope`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Inactive user")]
    InactiveUser,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Credential(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Credential(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::InactiveUser => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Credential(_) | ApiError::Config(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-safe message. Internal failures are logged, not echoed.
    fn message(&self) -> String {
        match self {
            ApiError::Credential(AuthError::Hash(_)) | ApiError::Database(_) => {
                "An error occurred while processing your request".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "success": false, "message": self.message() }));

        if status == StatusCode::UNAUTHORIZED {
            // Bearer challenge on every credential rejection
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
