use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use crate::database::models::attendance::{
    Attendance, AttendanceInput, AttendanceListFilter, AttendancePatch,
};
use crate::error::ApiError;
use crate::handlers::AppState;
use crate::middleware::CurrentUser;
use crate::response::{messages, Envelope};

/// GET /api/attendance/get_attendances
pub async fn get_attendances(
    State(state): State<AppState>,
    Query(filter): Query<AttendanceListFilter>,
) -> Result<Envelope<Vec<Attendance>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM attendances WHERE 1 = 1");

    if let Some(memberid) = filter.memberid {
        query.push(" AND memberid = ").push_bind(memberid);
    }
    if let Some(serviceid) = filter.serviceid {
        query.push(" AND serviceid = ").push_bind(serviceid);
    }
    if let Some(attendancestatusid) = filter.attendancestatusid {
        query.push(" AND attendancestatusid = ").push_bind(attendancestatusid);
    }
    query.push(" ORDER BY createdon");

    let attendances: Vec<Attendance> = query.build_query_as().fetch_all(&state.pool).await?;

    if attendances.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }
    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, attendances))
}

/// GET /api/attendance/get_attendance_byId/:id
pub async fn get_attendance_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<Attendance>, ApiError> {
    let attendance = sqlx::query_as::<_, Attendance>("SELECT * FROM attendances WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match attendance {
        Some(attendance) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, attendance)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}

/// POST /api/attendance/add_attendance
pub async fn add_attendance(
    State(state): State<AppState>,
    Json(input): Json<AttendanceInput>,
) -> Result<Envelope<Attendance>, ApiError> {
    let inserted = sqlx::query_as::<_, Attendance>(
        "INSERT INTO attendances (memberid, serviceid, attendancestatusid, createdon) \
         VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(input.memberid)
    .bind(input.serviceid)
    .bind(input.attendancestatusid)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await?;

    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, inserted))
}

/// PUT /api/attendance/update_attendance/:id
pub async fn update_attendance(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(patch): Json<AttendancePatch>,
) -> Result<Envelope<Attendance>, ApiError> {
    let existing = sqlx::query_as::<_, Attendance>("SELECT * FROM attendances WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    let Some(mut attendance) = existing else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    if let Some(memberid) = patch.memberid {
        attendance.memberid = memberid;
    }
    if let Some(serviceid) = patch.serviceid {
        attendance.serviceid = serviceid;
    }
    if let Some(attendancestatusid) = patch.attendancestatusid {
        attendance.attendancestatusid = attendancestatusid;
    }

    let updated = sqlx::query_as::<_, Attendance>(
        "UPDATE attendances SET memberid = ?, serviceid = ?, attendancestatusid = ?, \
         modifiedby = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(attendance.memberid)
    .bind(attendance.serviceid)
    .bind(attendance.attendancestatusid)
    .bind(current_user.id)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, updated))
}

/// DELETE /api/attendance/delete_attendance/:id
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<Attendance>, ApiError> {
    let deleted =
        sqlx::query_as::<_, Attendance>("DELETE FROM attendances WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    match deleted {
        Some(attendance) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, attendance)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}
