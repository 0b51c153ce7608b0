use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
    pub createdby: i64,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
    pub modifiedby: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceTypeInput {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceTypeListFilter {
    pub name: Option<String>,
}

/// List/get projection joined with the creating and modifying users' emails.
#[derive(Debug, FromRow, Serialize)]
pub struct ServiceTypeWithUser {
    pub id: i64,
    pub name: String,
    pub createdby: String,
    pub modifiedby: Option<String>,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
}
