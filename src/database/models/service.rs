use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: i64,
    pub servicetypeid: i64,
    pub date_event: NaiveDate,
    pub time_start: NaiveTime,
    pub location: String,
    pub createdby: i64,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
    pub modifiedby: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceInput {
    pub servicetypeid: i64,
    pub date_event: NaiveDate,
    pub time_start: NaiveTime,
    pub location: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServicePatch {
    pub servicetypeid: Option<i64>,
    pub date_event: Option<NaiveDate>,
    pub time_start: Option<NaiveTime>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceListFilter {
    pub servicetypeid: Option<i64>,
    pub location: Option<String>,
    pub date_event: Option<NaiveDate>,
    pub time_start: Option<NaiveTime>,
}

/// List/get projection joined with the service type name and user emails.
#[derive(Debug, FromRow, Serialize)]
pub struct ServiceWithDetails {
    pub id: i64,
    pub servicename: String,
    pub date_event: NaiveDate,
    pub time_start: NaiveTime,
    pub location: String,
    pub createdby: String,
    pub modifiedby: Option<String>,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
}
