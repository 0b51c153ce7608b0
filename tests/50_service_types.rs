mod common;

use axum::http::StatusCode;
use common::{add_user, authed_admin, login, TestApp};
use serde_json::json;

#[tokio::test]
async fn duplicate_service_type_reports_the_existing_row() {
    let app = TestApp::spawn().await;
    let token = authed_admin(&app).await;

    let body = json!({ "name": "MidWeek" });
    let (_, first) = app.post_json_auth("/api/servicetype/addservicetype", &token, &body).await;
    assert_eq!(first["success"], true);

    let (status, second) =
        app.post_json_auth("/api/servicetype/addservicetype", &token, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["success"], false);
    assert_eq!(second["message"], "Service Type already exist");
    assert_eq!(second["data"]["id"], first["data"]["id"]);

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM servicetypes").fetch_one(&app.pool).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn listing_joins_the_creator_email() {
    let app = TestApp::spawn().await;
    let token = authed_admin(&app).await;

    app.post_json_auth("/api/servicetype/addservicetype", &token, &json!({ "name": "Sunday" }))
        .await;

    let (_, listed) = app.get_auth("/api/servicetype/getservicetypes", &token).await;

    let rows = listed["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Sunday");
    assert_eq!(rows[0]["createdby"], "admin@example.com");
    assert!(rows[0]["modifiedby"].is_null());
}

#[tokio::test]
async fn update_stamps_the_modifier_email() {
    let app = TestApp::spawn().await;
    let token = authed_admin(&app).await;
    add_user(&app, "second@example.com", "hunter2").await;
    let second = login(&app, "second@example.com", "hunter2").await;

    let (_, created) = app
        .post_json_auth("/api/servicetype/addservicetype", &token, &json!({ "name": "Sunday" }))
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (_, updated) = app
        .put_json_auth(
            &format!("/api/servicetype/updateservicetype/{id}"),
            &second,
            &json!({ "name": "Sunday Morning" }),
        )
        .await;
    assert_eq!(updated["success"], true);
    assert_eq!(updated["data"]["name"], "Sunday Morning");

    let (_, fetched) =
        app.get_auth(&format!("/api/servicetype/getservicebyid/{id}"), &token).await;
    assert_eq!(fetched["data"]["createdby"], "admin@example.com");
    assert_eq!(fetched["data"]["modifiedby"], "second@example.com");
}

#[tokio::test]
async fn missing_service_type_reports_no_entry() {
    let app = TestApp::spawn().await;
    let token = authed_admin(&app).await;

    let (_, fetched) = app.get_auth("/api/servicetype/getservicebyid/99", &token).await;
    assert_eq!(fetched["success"], false);
    assert_eq!(fetched["message"], "No data was found");

    let (_, deleted) = app.delete_auth("/api/servicetype/deleteservicetype/99", &token).await;
    assert_eq!(deleted["success"], false);
}

#[tokio::test]
async fn delete_returns_the_removed_service_type() {
    let app = TestApp::spawn().await;
    let token = authed_admin(&app).await;

    let (_, created) = app
        .post_json_auth("/api/servicetype/addservicetype", &token, &json!({ "name": "Sunday" }))
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (_, deleted) =
        app.delete_auth(&format!("/api/servicetype/deleteservicetype/{id}"), &token).await;

    assert_eq!(deleted["success"], true);
    assert_eq!(deleted["data"]["name"], "Sunday");
}
