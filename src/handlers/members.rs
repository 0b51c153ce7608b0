use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::auth;
use crate::database::models::member::{Member, MemberInput, MemberListFilter, MemberPatch};
use crate::database::schema::MAX_PROFILE_PICTURE_BYTES;
use crate::error::ApiError;
use crate::handlers::{given, is_unique_violation, AppState};
use crate::middleware::CurrentUser;
use crate::response::{messages, Envelope};

async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>("SELECT * FROM members WHERE emailaddress = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Profile pictures must be genuine image data. Accepts the formats browsers
/// actually upload: PNG, JPEG, GIF, BMP, WebP.
fn is_image(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || bytes.starts_with(b"BM")
        || (bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP")
}

fn picture_acceptable(picture: &Option<Vec<u8>>) -> bool {
    match picture {
        None => true,
        Some(bytes) => bytes.len() <= MAX_PROFILE_PICTURE_BYTES && is_image(bytes),
    }
}

/// GET /api/membersroute/get_members
pub async fn get_members(
    State(state): State<AppState>,
    Query(filter): Query<MemberListFilter>,
) -> Result<Envelope<Vec<Member>>, ApiError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM members WHERE 1 = 1");

    for (column, value) in [
        ("firstname", &filter.firstname),
        ("lastname", &filter.lastname),
        ("middlename", &filter.middlename),
        ("gender", &filter.gender),
        ("emailaddress", &filter.emailaddress),
        ("phonenumber", &filter.phonenumber),
    ] {
        if let Some(value) = given(value) {
            query.push(format!(" AND instr({column}, "));
            query.push_bind(value.to_string());
            query.push(") > 0");
        }
    }
    query.push(" ORDER BY createdon");

    let members: Vec<Member> = query.build_query_as().fetch_all(&state.pool).await?;

    if members.is_empty() {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    }
    Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, members))
}

/// GET /api/membersroute/get_member_byId/:member_id
pub async fn get_member_by_id(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Result<Envelope<Member>, ApiError> {
    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ?")
        .bind(member_id)
        .fetch_optional(&state.pool)
        .await?;

    match member {
        Some(member) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, member)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}

/// POST /api/membersroute/add_member
pub async fn add_member(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(input): Json<MemberInput>,
) -> Result<Envelope<Member>, ApiError> {
    if !auth::is_valid_email(&input.emailaddress) {
        return Ok(Envelope::fail(messages::INVALID_EMAIL));
    }
    // Rejected before any row is written
    if !picture_acceptable(&input.profile_picture) {
        return Ok(Envelope::fail(messages::INVALID_PROFILE_PICTURE));
    }
    if let Some(existing) = find_by_email(&state.pool, &input.emailaddress).await? {
        return Ok(Envelope::conflict(messages::EMAIL_EXISTS, existing));
    }

    let inserted = sqlx::query_as::<_, Member>(
        "INSERT INTO members (firstname, lastname, middlename, gender, emailaddress, phonenumber, dob, \
         profile_picture, house_address, title_id, createdby, createdon) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(&input.firstname)
    .bind(&input.lastname)
    .bind(&input.middlename)
    .bind(&input.gender)
    .bind(&input.emailaddress)
    .bind(&input.phonenumber)
    .bind(input.dob)
    .bind(&input.profile_picture)
    .bind(&input.house_address)
    .bind(input.title_id)
    .bind(current_user.id)
    .bind(Utc::now())
    .fetch_one(&state.pool)
    .await;

    match inserted {
        Ok(member) => Ok(Envelope::ok(messages::MEMBER_ADDED, member)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_email(&state.pool, &input.emailaddress).await? {
                Some(existing) => Ok(Envelope::conflict(messages::EMAIL_EXISTS, existing)),
                None => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// PUT /api/membersroute/update_member/:id
pub async fn update_member(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(patch): Json<MemberPatch>,
) -> Result<Envelope<Member>, ApiError> {
    let existing = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    let Some(mut member) = existing else {
        return Ok(Envelope::fail(messages::NO_ENTRY));
    };

    if let Some(email) = given(&patch.emailaddress) {
        if !auth::is_valid_email(email) {
            return Ok(Envelope::fail(messages::INVALID_EMAIL));
        }
        if let Some(other) = find_by_email(&state.pool, email).await? {
            if other.id != id {
                return Ok(Envelope::conflict(messages::EMAIL_EXISTS, other));
            }
        }
        member.emailaddress = email.to_string();
    }
    if let Some(value) = given(&patch.firstname) {
        member.firstname = value.to_string();
    }
    if let Some(value) = given(&patch.lastname) {
        member.lastname = value.to_string();
    }
    if let Some(value) = given(&patch.middlename) {
        member.middlename = value.to_string();
    }
    if let Some(value) = given(&patch.gender) {
        member.gender = value.to_string();
    }
    if let Some(value) = given(&patch.phonenumber) {
        member.phonenumber = value.to_string();
    }
    if let Some(value) = given(&patch.house_address) {
        member.house_address = value.to_string();
    }
    if let Some(dob) = patch.dob {
        member.dob = dob;
    }
    if let Some(title_id) = patch.title_id {
        member.title_id = title_id;
    }
    if let Some(picture) = patch.profile_picture {
        if !picture_acceptable(&Some(picture.clone())) {
            return Ok(Envelope::fail(messages::INVALID_PROFILE_PICTURE));
        }
        member.profile_picture = Some(picture);
    }

    let updated = sqlx::query_as::<_, Member>(
        "UPDATE members SET firstname = ?, lastname = ?, middlename = ?, gender = ?, emailaddress = ?, \
         phonenumber = ?, dob = ?, profile_picture = ?, house_address = ?, title_id = ?, \
         modifiedby = ?, modifiedon = ? WHERE id = ? RETURNING *",
    )
    .bind(&member.firstname)
    .bind(&member.lastname)
    .bind(&member.middlename)
    .bind(&member.gender)
    .bind(&member.emailaddress)
    .bind(&member.phonenumber)
    .bind(member.dob)
    .bind(&member.profile_picture)
    .bind(&member.house_address)
    .bind(member.title_id)
    .bind(current_user.id)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.pool)
    .await;

    match updated {
        Ok(member) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, member)),
        Err(err) if is_unique_violation(&err) => {
            match find_by_email(&state.pool, &member.emailaddress).await? {
                Some(other) if other.id != id => {
                    Ok(Envelope::conflict(messages::EMAIL_EXISTS, other))
                }
                _ => Err(err.into()),
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/membersroute/delete_member/:id
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Envelope<Member>, ApiError> {
    let deleted = sqlx::query_as::<_, Member>("DELETE FROM members WHERE id = ? RETURNING *")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    match deleted {
        Some(member) => Ok(Envelope::ok(messages::OPERATION_SUCCESSFUL, member)),
        None => Ok(Envelope::fail(messages::NO_ENTRY)),
    }
}
