use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is none or not found in the environment")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Process-wide configuration, loaded once at startup and carried in the
/// router state. Handlers never read the environment directly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub reset_password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DB_URL")?;
        let secret_key = require("SECRET_KEY")?;

        let algorithm_raw = require("ALGORITHM")?;
        let algorithm = Algorithm::from_str(&algorithm_raw)
            .map_err(|_| ConfigError::Invalid("ALGORITHM", algorithm_raw))?;

        let ttl_raw = require("ACCESS_TOKEN_EXPIRE_MINUTE")?;
        let access_token_expire_minutes = ttl_raw
            .parse::<i64>()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_EXPIRE_MINUTE", ttl_raw))?;

        let reset_password = require("RESET_PASSWORD")?;

        Ok(Self {
            database_url,
            secret_key,
            algorithm,
            access_token_expire_minutes,
            reset_password,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}
