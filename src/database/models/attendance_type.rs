use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceType {
    pub id: i64,
    pub name: String,
    pub createdby: i64,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
    pub modifiedby: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceTypeInput {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AttendanceTypeListFilter {
    pub name: Option<String>,
}

#[derive(Debug, FromRow, Serialize)]
pub struct AttendanceTypeWithUser {
    pub id: i64,
    pub name: String,
    pub createdby: String,
    pub modifiedby: Option<String>,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
}
