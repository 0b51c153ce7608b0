use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::auth;
use crate::database::models::user::{User, UserInput, UserListFilter, UserOut, UserPatch};
use crate::error::ApiError;
use crate::handlers::{given, is_unique_violation, AppState};
use crate::response::{messages, Envelope};

pub(crate) async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE emailaddress = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// GET|POST /api/user/get_users
pub async fn get_users(
    State(state): State<AppState>,
    Query(filter): Query<UserListFilter>,
) -> Result<Envelope<Vec<UserOut>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM users WHERE 1 = 1");

    // Name fields match on case-sensitive substring, email and phone exactly.
    for (column, value) in [
        ("firstname", &filter.firstname),
        ("middlename", &filter.middlename),
        ("lastname", &filter.lastname),
        ("gender", &filter.gender),
    ] {
        if let Some(value) = given(value) {
            query.push(format!(" AND instr({column}, "));
            query.push_bind(value.to_string());
            query.push(") > 0");
        }
    }
    if let Some(email) = given(&filter.emailaddress) {
        query.push(" AND emailaddress = ").push_bind(email.to_string());
    }
    if let Some(phone) = given(&filter.phonenumber) {
        query.push(" AND phonenumber = ").push_bind(phone.to_string());
    }
    query.push(" ORDER BY createdon");

    let users: Vec<User> = query.build_query_as().fetch_all(&state.pool).await?;

    if users.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }

    Ok(Envelope::ok(
        messages::OPERATION_SUCCESSFUL,
        users.into_iter().map(UserOut::from).collect(),
    ))
}

/// POST /api/user/add_user
pub async fn add_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<Envelope<UserOut>, ApiError> {
    if !auth::is_valid_email(&input.emailaddress) {
        return Ok(Envelope::fail(messages::INVALID_EMAIL));
    }

    if let Some(existing) = find_by_email(&state.pool, &input.emailaddress).await? {
        return Ok(Envelope::conflict(messages::EMAIL_EXISTS, existing.into()));
    }

    let hash = auth::hash_password(&input.emailaddress, &input.password)?;

    let inserted = sqlx::query_as::<_, User>(
        "INSERT INTO users (firstname, middlename, lastname, gender, phonenumber, emailaddress, password, disabled, createdon) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&input.firstname)
    .bind(&input.middlename)
    .bind(&input.lastname)
    .bind(&input.gender)
    .bind(&input.phonenumber)
    .bind(&input.emailaddress)
    .bind(&hash)
    .bind(input.disabled)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await;

    match inserted {
        Ok(user) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, user.into())),
        // Lost the check-then-act race; the unique index is the real guard.
        Err(err) if is_unique_violation(&err) => {
            match find_by_email(&state.pool, &input.emailaddress).await? {
                Some(existing) => Ok(Envelope::conflict(messages::EMAIL_EXISTS, existing.into())),
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// PUT /api/user/update_user/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> Result<Envelope<UserOut>, ApiError> {
    let Some(mut user) = find_by_id(&state.pool, id).await? else {
        return Ok(Envelope::fail(messages::USER_NOT_FOUND));
    };

    if let Some(email) = given(&patch.emailaddress) {
        if !auth::is_valid_email(email) {
            return Ok(Envelope::fail(messages::INVALID_EMAIL));
        }
        if let Some(existing) = find_by_email(&state.pool, email).await? {
            if existing.id != id {
                return Ok(Envelope::conflict(messages::EMAIL_EXISTS, existing.into()));
            }
        }
        user.emailaddress = email.to_string();
    }
    if let Some(value) = given(&patch.firstname) {
        user.firstname = value.to_string();
    }
    if let Some(value) = given(&patch.middlename) {
        user.middlename = value.to_string();
    }
    if let Some(value) = given(&patch.lastname) {
        user.lastname = value.to_string();
    }
    if let Some(value) = given(&patch.gender) {
        user.gender = value.to_string();
    }
    if let Some(value) = given(&patch.phonenumber) {
        user.phonenumber = value.to_string();
    }
    if let Some(disabled) = patch.disabled {
        user.disabled = disabled;
    }

    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET firstname = ?, middlename = ?, lastname = ?, gender = ?, phonenumber = ?, \
         emailaddress = ?, disabled = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&user.firstname)
    .bind(&user.middlename)
    .bind(&user.lastname)
    .bind(&user.gender)
    .bind(&user.phonenumber)
    .bind(&user.emailaddress)
    .bind(user.disabled)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await;

    match updated {
        Ok(user) => Ok(Envelope::ok(messages::USER_UPDATED, user.into())),
        Err(err) if is_unique_violation(&err) => {
            match find_by_email(&state.pool, &user.emailaddress).await? {
                Some(existing) if existing.id != id => {
                    Ok(Envelope::conflict(messages::EMAIL_EXISTS, existing.into()))
                }
                _ => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/user/delete_user/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<UserOut>, ApiError> {
    let deleted = sqlx::query_as::<_, User>("DELETE FROM users WHERE id = ? RETURNING *")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match deleted {
        Some(user) => Ok(Envelope::ok(messages::USER_REMOVED, user.into())),
        None => Ok(Envelope::fail(messages::USER_NOT_FOUND)),
    }
}

/// PUT /api/user/enable_disable/:id
pub async fn enable_disable_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<UserOut>, ApiError> {
    let Some(user) = find_by_id(&state.pool, id).await? else {
        return Ok(Envelope::fail(messages::USER_NOT_FOUND));
    };

    let toggled = sqlx::query_as::<_, User>(
        "UPDATE users SET disabled = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(!user.disabled)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    let message = if toggled.disabled {
        messages::USER_DISABLED
    } else {
        messages::USER_ENABLED
    };

    Ok(Envelope::ok(message, toggled.into()))
}

#[derive(Debug, Deserialize)]
pub struct ForgottenPassword {
    pub email: String,
    pub new_password: String,
}

/// PUT /api/user/forgotten_password
pub async fn forgotten_password(
    State(state): State<AppState>,
    Query(request): Query<ForgottenPassword>,
) -> Result<Envelope<UserOut>, ApiError> {
    if !auth::is_valid_email(&request.email) {
        return Ok(Envelope::fail(messages::INVALID_EMAIL));
    }

    let Some(user) = find_by_email(&state.pool, &request.email).await? else {
        return Ok(Envelope::fail(messages::USER_NOT_FOUND));
    };

    let hash = auth::hash_password(&user.emailaddress, &request.new_password)?;

    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET password = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&hash)
    .bind(Utc::now())
    .bind(user.id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Envelope::ok(messages::USER_PASSWORD_RESET, updated.into()))
}

/// PUT /api/user/reset_password/:id - reset to the configured default password
pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<UserOut>, ApiError> {
    let Some(user) = find_by_id(&state.pool, id).await? else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    let hash = auth::hash_password(&user.emailaddress, &state.config.reset_password)?;

    let updated = sqlx::query_as::<_, User>(
        "UPDATE users SET password = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&hash)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, updated.into()))
}
