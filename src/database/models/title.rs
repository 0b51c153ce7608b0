use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Title {
    pub id: i64,
    pub title_name: String,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TitleInput {
    pub title_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TitleListFilter {
    pub name: Option<String>,
}
