pub mod attendance_types;
pub mod attendances;
pub mod members;
pub mod service_types;
pub mod services;
pub mod titles;
pub mod token;
pub mod users;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;

/// Shared router state: one pool, one immutable config.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

/// Treats absent and blank filter/patch strings the same: neither narrows a
/// query nor overwrites a stored field.
pub(crate) fn given(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
