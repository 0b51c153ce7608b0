use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::models::title::{Title, TitleInput, TitleListFilter};
use crate::error::ApiError;
use crate::handlers::{given, is_unique_violation, AppState};
use crate::response::{messages, Envelope};

async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Title>, sqlx::Error> {
    sqlx::query_as::<_, Title>("SELECT * FROM titles WHERE title_name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// GET /api/titles/getAll
pub async fn get_titles(
    State(state): State<AppState>,
    Query(filter): Query<TitleListFilter>,
) -> Result<Envelope<Vec<Title>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM titles WHERE 1 = 1");
    if let Some(name) = given(&filter.name) {
        query.push(" AND instr(title_name, ");
        query.push_bind(name.to_string());
        query.push(") > 0");
    }
    query.push(" ORDER BY createdon");

    let titles: Vec<Title> = query.build_query_as().fetch_all(&state.pool).await?;

    if titles.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }
    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, titles))
}

/// GET /api/titles/getbyId/:title_id
pub async fn get_title_by_id(
    State(state): State<AppState>,
    Path(title_id): Path<i64>,
) -> Result<Envelope<Title>, ApiError> {
    let title = sqlx::query_as::<_, Title>("SELECT * FROM titles WHERE id = ?")
        .bind(title_id)
        .fetch_optional(&state.pool)
        .await?;

    match title {
        Some(title) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, title)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}

/// POST /api/titles/addtitle
pub async fn add_title(
    State(state): State<AppState>,
    Json(input): Json<TitleInput>,
) -> Result<Envelope<Title>, ApiError> {
    if let Some(existing) = find_by_name(&state.pool, &input.title_name).await? {
        return Ok(Envelope::conflict(messages::TITLE_EXISTS, existing));
    }

    let inserted = sqlx::query_as::<_, Title>(
        "INSERT INTO titles (title_name, createdon) VALUES (?, ?) RETURNING *",
    )
    .bind(&input.title_name)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await;

    match inserted {
        Ok(title) => Ok(Envelope::ok(messages::TITLE_ADDED, title)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_name(&state.pool, &input.title_name).await? {
                Some(existing) => Ok(Envelope::conflict(messages::TITLE_EXISTS, existing)),
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// PUT /api/titles/updatetitle/:id
pub async fn update_title(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TitleInput>,
) -> Result<Envelope<Title>, ApiError> {
    let existing = sqlx::query_as::<_, Title>("SELECT * FROM titles WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    let Some(mut title) = existing else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    let name = input.title_name.trim();
    if !name.is_empty() {
        if let Some(other) = find_by_name(&state.pool, name).await? {
            if other.id != id {
                return Ok(Envelope::conflict(messages::TITLE_EXISTS, other));
            }
        }
        title.title_name = name.to_string();
    }

    let updated = sqlx::query_as::<_, Title>(
        "UPDATE titles SET title_name = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&title.title_name)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await;

    match updated {
        Ok(title) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, title)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_name(&state.pool, &title.title_name).await? {
                Some(other) if other.id != id => {
                    Ok(Envelope::conflict(messages::TITLE_EXISTS, other))
                }
                _ => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/titles/deletetitle/:id
pub async fn remove_title(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<Title>, ApiError> {
    let deleted = sqlx::query_as::<_, Title>("DELETE FROM titles WHERE id = ? RETURNING *")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match deleted {
        Some(title) => Ok(Envelope::ok(messages::TITLE_REMOVED, title)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}
