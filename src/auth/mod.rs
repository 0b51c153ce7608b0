use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

/// Signed token payload: `{id, emailAddress, exp}` plus the issue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    #[serde(rename = "emailAddress")]
    pub email_address: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Any signature, expiry or parse failure collapses into this variant so
    /// callers cannot distinguish why a token was rejected.
    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token generation failed: {0}")]
    TokenGeneration(String),
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}$").expect("email pattern")
});

/// Anchored full-string check; an address with trailing garbage after a
/// syntactically valid prefix is rejected.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Hash over the trimmed email concatenated with the trimmed password, so
/// verification always needs both. Not reversible.
pub fn hash_password(email: &str, password: &str) -> Result<String, AuthError> {
    let combined = format!("{}{}", email.trim(), password.trim());
    Ok(bcrypt::hash(combined, bcrypt::DEFAULT_COST)?)
}

pub fn verify_password(email: &str, password: &str, hash: &str) -> bool {
    let combined = format!("{}{}", email.trim(), password.trim());
    bcrypt::verify(combined, hash).unwrap_or(false)
}

pub fn issue_token(config: &AppConfig, id: i64, email_address: &str) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        id,
        email_address: email_address.to_string(),
        exp: (now + Duration::minutes(config.access_token_expire_minutes)).timestamp(),
        iat: now.timestamp(),
    };

    let header = Header::new(config.algorithm);
    encode(&header, &claims, &EncodingKey::from_secret(config.secret_key.as_bytes()))
        .map_err(|err| AuthError::TokenGeneration(err.to_string()))
}

pub fn decode_token(config: &AppConfig, token: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(config.algorithm);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidCredentials)
}
