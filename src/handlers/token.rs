use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::ApiError;
use crate::handlers::users::find_by_email;
use crate::handlers::AppState;

/// OAuth2-style password grant body: `username` carries the email address.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// POST /token - exchange credentials for a bearer token.
///
/// Every rejection path returns the same 401 so callers cannot probe which
/// email addresses exist.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<Token>, ApiError> {
    if !auth::is_valid_email(&form.username) {
        return Err(ApiError::Unauthorized);
    }

    let user = find_by_email(&state.pool, &form.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !auth::verify_password(&form.username, &form.password, &user.password) {
        return Err(ApiError::Unauthorized);
    }

    let access_token = auth::issue_token(&state.config, user.id, &user.emailaddress)?;

    Ok(Json(Token {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
