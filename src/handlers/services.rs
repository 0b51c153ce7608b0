use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use crate::database::models::service::{
    Service, ServiceInput, ServiceListFilter, ServicePatch, ServiceWithDetails,
};
use crate::error::ApiError;
use crate::handlers::{given, AppState};
use crate::middleware::CurrentUser;
use crate::response::{messages, Envelope};

const JOINED_SELECT: &str = "SELECT s.id, st.name AS servicename, s.date_event, s.time_start, \
     s.location, c.emailaddress AS createdby, m.emailaddress AS modifiedby, \
     s.createdon, s.modifiedon \
     FROM services s \
     JOIN servicetypes st ON st.id = s.servicetypeid \
     JOIN users c ON c.id = s.createdby \
     LEFT JOIN users m ON m.id = s.modifiedby";

/// GET /api/service/getservices
pub async fn get_services(
    State(state): State<AppState>,
    Query(filter): Query<ServiceListFilter>,
) -> Result<Envelope<Vec<ServiceWithDetails>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new(JOINED_SELECT);
    query.push(" WHERE 1 = 1");

    if let Some(servicetypeid) = filter.servicetypeid {
        query.push(" AND s.servicetypeid = ").push_bind(servicetypeid);
    }
    if let Some(location) = given(&filter.location) {
        query.push(" AND instr(s.location, ");
        query.push_bind(location.to_string());
        query.push(") > 0");
    }
    if let Some(date_event) = filter.date_event {
        query.push(" AND s.date_event = ").push_bind(date_event);
    }
    if let Some(time_start) = filter.time_start {
        query.push(" AND s.time_start = ").push_bind(time_start);
    }
    query.push(" ORDER BY s.createdon");

    let rows: Vec<ServiceWithDetails> = query.build_query_as().fetch_all(&state.pool).await?;

    if rows.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }
    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, rows))
}

/// GET /api/service/getservicebyid/:id
pub async fn get_service_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<ServiceWithDetails>, ApiError> {
    let row = sqlx::query_as::<_, ServiceWithDetails>(&format!("{JOINED_SELECT} WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match row {
        Some(row) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, row)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}

/// POST /api/service/addservice
pub async fn add_service(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(input): Json<ServiceInput>,
) -> Result<Envelope<Service>, ApiError> {
    let inserted = sqlx::query_as::<_, Service>(
        "INSERT INTO services (servicetypeid, date_event, time_start, location, createdby, createdon) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(input.servicetypeid)
    .bind(input.date_event)
    .bind(input.time_start)
    .bind(&input.location)
    .bind(current_user.id)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await?;

    Ok(Envelope::ok(messages::SERVICE_ADDED, inserted))
}

/// PUT /api/service/updateservice/:id
pub async fn update_service(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(patch): Json<ServicePatch>,
) -> Result<Envelope<Service>, ApiError> {
    let existing = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    let Some(mut service) = existing else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    if let Some(servicetypeid) = patch.servicetypeid {
        service.servicetypeid = servicetypeid;
    }
    if let Some(date_event) = patch.date_event {
        service.date_event = date_event;
    }
    if let Some(time_start) = patch.time_start {
        service.time_start = time_start;
    }
    if let Some(location) = given(&patch.location) {
        service.location = location.to_string();
    }

    let updated = sqlx::query_as::<_, Service>(
        "UPDATE services SET servicetypeid = ?, date_event = ?, time_start = ?, location = ?, \
         modifiedby = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(service.servicetypeid)
    .bind(service.date_event)
    .bind(service.time_start)
    .bind(&service.location)
    .bind(current_user.id)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, updated))
}

/// DELETE /api/service/deleteservice/:id
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<Service>, ApiError> {
    let deleted = sqlx::query_as::<_, Service>("DELETE FROM services WHERE id = ? RETURNING *")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match deleted {
        Some(service) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, service)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}
