use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::models::service_type::{
    ServiceType, ServiceTypeInput, ServiceTypeListFilter, ServiceTypeWithUser,
};
use crate::error::ApiError;
use crate::handlers::{given, is_unique_violation, AppState};
use crate::middleware::CurrentUser;
use crate::response::{messages, Envelope};

const JOINED_SELECT: &str = "SELECT st.id, st.name, c.emailaddress AS createdby, \
     m.emailaddress AS modifiedby, st.createdon, st.modifiedon \
     FROM servicetypes st \
     JOIN users c ON c.id = st.createdby \
     LEFT JOIN users m ON m.id = st.modifiedby";

async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<ServiceType>, sqlx::Error> {
    sqlx::query_as::<_, ServiceType>("SELECT * FROM servicetypes WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// GET /api/servicetype/getservicetypes
pub async fn get_service_types(
    State(state): State<AppState>,
    Query(filter): Query<ServiceTypeListFilter>,
) -> Result<Envelope<Vec<ServiceTypeWithUser>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new(JOINED_SELECT);
    query.push(" WHERE 1 = 1");
    if let Some(name) = given(&filter.name) {
        query.push(" AND instr(st.name, ");
        query.push_bind(name.to_string());
        query.push(") > 0");
    }
    query.push(" ORDER BY st.createdon");

    let rows: Vec<ServiceTypeWithUser> = query.build_query_as().fetch_all(&state.pool).await?;

    if rows.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }
    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, rows))
}

/// GET /api/servicetype/getservicebyid/:id
pub async fn get_service_type_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<ServiceTypeWithUser>, ApiError> {
    let row = sqlx::query_as::<_, ServiceTypeWithUser>(&format!("{JOINED_SELECT} WHERE st.id = ?"))
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match row {
        Some(row) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, row)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}

/// POST /api/servicetype/addservicetype
pub async fn add_service_type(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(input): Json<ServiceTypeInput>,
) -> Result<Envelope<ServiceType>, ApiError> {
    if let Some(existing) = find_by_name(&state.pool, &input.name).await? {
        return Ok(Envelope::conflict(messages::SERVICE_TYPE_EXISTS, existing));
    }

    let inserted = sqlx::query_as::<_, ServiceType>(
        "INSERT INTO servicetypes (name, createdby, createdon) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(&input.name)
    .bind(current_user.id)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await;

    match inserted {
        Ok(service_type) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, service_type)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_name(&state.pool, &input.name).await? {
                Some(existing) => Ok(Envelope::conflict(messages::SERVICE_TYPE_EXISTS, existing)),
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// PUT /api/servicetype/updateservicetype/:id
pub async fn update_service_type(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(input): Json<ServiceTypeInput>,
) -> Result<Envelope<ServiceType>, ApiError> {
    let existing = sqlx::query_as::<_, ServiceType>("SELECT * FROM servicetypes WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    let Some(mut service_type) = existing else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    let name = input.name.trim();
    if !name.is_empty() {
        if let Some(other) = find_by_name(&state.pool, name).await? {
            if other.id != id {
                return Ok(Envelope::conflict(messages::SERVICE_TYPE_EXISTS, other));
            }
        }
        service_type.name = name.to_string();
    }

    let updated = sqlx::query_as::<_, ServiceType>(
        "UPDATE servicetypes SET name = ?, modifiedby = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&service_type.name)
    .bind(current_user.id)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await;

    match updated {
        Ok(service_type) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, service_type)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_name(&state.pool, &service_type.name).await? {
                Some(other) if other.id != id => {
                    Ok(Envelope::conflict(messages::SERVICE_TYPE_EXISTS, other))
                }
                _ => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/servicetype/deleteservicetype/:id
pub async fn remove_service_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<ServiceType>, ApiError> {
    let deleted =
        sqlx::query_as::<_, ServiceType>("DELETE FROM servicetypes WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    match deleted {
        Some(service_type) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, service_type)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}
