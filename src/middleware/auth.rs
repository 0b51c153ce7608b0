use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth;
use crate::error::ApiError;
use crate::handlers::users::find_by_email;
use crate::handlers::AppState;

/// Identity resolved by the auth gate, exposed to protected handlers through
/// request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email_address: String,
}

/// Auth gate: bearer token -> claims -> user row -> active check.
///
/// Runs once per protected request and holds no state across requests; the
/// user row is re-read every time so a disable takes effect immediately,
/// even for tokens that are still within their validity window.
pub async fn require_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;

    let claims =
        auth::decode_token(&state.config, token).map_err(|_| ApiError::Unauthorized)?;

    if !auth::is_valid_email(&claims.email_address) {
        return Err(ApiError::Unauthorized);
    }

    let user = find_by_email(&state.pool, &claims.email_address)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if user.disabled {
        tracing::warn!(user = %user.emailaddress, "rejected token for disabled user");
        return Err(ApiError::InactiveUser);
    }

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email_address: user.emailaddress,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
