use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::models::attendance_type::{
    AttendanceType, AttendanceTypeInput, AttendanceTypeListFilter, AttendanceTypeWithUser,
};
use crate::error::ApiError;
use crate::handlers::{given, is_unique_violation, AppState};
use crate::middleware::CurrentUser;
use crate::response::{messages, Envelope};

const JOINED_SELECT: &str = "SELECT at.id, at.name, c.emailaddress AS createdby, \
     m.emailaddress AS modifiedby, at.createdon, at.modifiedon \
     FROM attendancetypes at \
     JOIN users c ON c.id = at.createdby \
     LEFT JOIN users m ON m.id = at.modifiedby";

async fn find_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<AttendanceType>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceType>("SELECT * FROM attendancetypes WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// GET /api/attendancetype/getAll
pub async fn get_attendance_types(
    State(state): State<AppState>,
    Query(filter): Query<AttendanceTypeListFilter>,
) -> Result<Envelope<Vec<AttendanceTypeWithUser>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new(JOINED_SELECT);
    query.push(" WHERE 1 = 1");
    if let Some(name) = given(&filter.name) {
        query.push(" AND instr(at.name, ");
        query.push_bind(name.to_string());
        query.push(") > 0");
    }
    query.push(" ORDER BY at.createdon");

    let rows: Vec<AttendanceTypeWithUser> = query.build_query_as().fetch_all(&state.pool).await?;

    if rows.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }
    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, rows))
}

/// GET /api/attendancetype/getbyId/:id
pub async fn get_attendance_type_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<AttendanceTypeWithUser>, ApiError> {
    let row =
        sqlx::query_as::<_, AttendanceTypeWithUser>(&format!("{JOINED_SELECT} WHERE at.id = ?"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    match row {
        Some(row) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, row)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}

/// POST /api/attendancetype/addattendancetype
pub async fn add_attendance_type(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(input): Json<AttendanceTypeInput>,
) -> Result<Envelope<AttendanceType>, ApiError> {
    if let Some(existing) = find_by_name(&state.pool, &input.name).await? {
        return Ok(Envelope::conflict(messages::ATTENDANCE_TYPE_EXISTS, existing));
    }

    let inserted = sqlx::query_as::<_, AttendanceType>(
        "INSERT INTO attendancetypes (name, createdby, createdon) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(&input.name)
    .bind(current_user.id)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await;

    match inserted {
        Ok(attendance_type) => {
            Ok(Envelope::ok(messages::ATTENDANCE_TYPE_ADDED, attendance_type))
        }
        Err(err) if is_unique_violation(&err) => {
            match find_by_name(&state.pool, &input.name).await? {
                Some(existing) => {
                    Ok(Envelope::conflict(messages::ATTENDANCE_TYPE_EXISTS, existing))
                }
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// PUT /api/attendancetype/updateattendancetype/:id
pub async fn update_attendance_type(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(input): Json<AttendanceTypeInput>,
) -> Result<Envelope<AttendanceType>, ApiError> {
    let existing =
        sqlx::query_as::<_, AttendanceType>("SELECT * FROM attendancetypes WHERE id = ?")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    let Some(mut attendance_type) = existing else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    let name = input.name.trim();
    if !name.is_empty() {
        if let Some(other) = find_by_name(&state.pool, name).await? {
            if other.id != id {
                return Ok(Envelope::conflict(messages::ATTENDANCE_TYPE_EXISTS, other));
            }
        }
        attendance_type.name = name.to_string();
    }

    let updated = sqlx::query_as::<_, AttendanceType>(
        "UPDATE attendancetypes SET name = ?, modifiedby = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&attendance_type.name)
    .bind(current_user.id)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await;

    match updated {
        Ok(attendance_type) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, attendance_type)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_name(&state.pool, &attendance_type.name).await? {
                Some(other) if other.id != id => {
                    Ok(Envelope::conflict(messages::ATTENDANCE_TYPE_EXISTS, other))
                }
                _ => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/attendancetype/deleteattendancetype/:id
pub async fn remove_attendance_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<AttendanceType>, ApiError> {
    let deleted =
        sqlx::query_as::<_, AttendanceType>("DELETE FROM attendancetypes WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    match deleted {
        Some(attendance_type) => {
            Ok(Envelope::ok(messages::ATTENDANCE_TYPE_REMOVED, attendance_type))
        }
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}
