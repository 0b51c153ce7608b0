use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: i64,
    pub memberid: i64,
    pub serviceid: i64,
    pub attendancestatusid: i64,
    pub createdon: DateTime<Utc>,
    pub modifiedon: Option<DateTime<Utc>>,
    pub modifiedby: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceInput {
    pub memberid: i64,
    pub serviceid: i64,
    pub attendancestatusid: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AttendancePatch {
    pub memberid: Option<i64>,
    pub serviceid: Option<i64>,
    pub attendancestatusid: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AttendanceListFilter {
    pub memberid: Option<i64>,
    pub serviceid: Option<i64>,
    pub attendancestatusid: Option<i64>,
}
