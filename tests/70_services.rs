mod common;

use axum::http::StatusCode;
use common::{authed_admin, TestApp};
use serde_json::{json, Value};

async fn setup(app: &TestApp) -> (String, i64) {
    let token = authed_admin(app).await;
    let (_, service_type) = app
        .post_json_auth("/api/servicetype/addservicetype", &token, &json!({ "name": "Sunday" }))
        .await;
    (token, service_type["data"]["id"].as_i64().unwrap())
}

fn service_body(service_type_id: i64, date: &str, location: &str) -> Value {
    json!({
        "servicetypeid": service_type_id,
        "date_event": date,
        "time_start": "09:30:00",
        "location": location,
    })
}

#[tokio::test]
async fn add_service_returns_the_new_row() {
    let app = TestApp::spawn().await;
    let (token, service_type_id) = setup(&app).await;

    let body = service_body(service_type_id, "2026-09-06", "Main Auditorium");
    let (status, response) = app.post_json_auth("/api/service/addservice", &token, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(response["message"], "Service Added Successfully");
    assert_eq!(response["data"]["servicetypeid"], service_type_id);
    assert_eq!(response["data"]["date_event"], "2026-09-06");
    assert_eq!(response["data"]["time_start"], "09:30:00");
}

#[tokio::test]
async fn listing_joins_the_service_type_name_and_creator() {
    let app = TestApp::spawn().await;
    let (token, service_type_id) = setup(&app).await;

    let body = service_body(service_type_id, "2026-09-06", "Main Auditorium");
    app.post_json_auth("/api/service/addservice", &token, &body).await;

    let (_, listed) = app.get_auth("/api/service/getservices", &token).await;

    let rows = listed["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["servicename"], "Sunday");
    assert_eq!(rows[0]["createdby"], "admin@example.com");
    assert_eq!(rows[0]["location"], "Main Auditorium");
}

#[tokio::test]
async fn services_filter_on_location_substring_and_date() {
    let app = TestApp::spawn().await;
    let (token, service_type_id) = setup(&app).await;

    app.post_json_auth(
        "/api/service/addservice",
        &token,
        &service_body(service_type_id, "2026-09-06", "Main Auditorium"),
    )
    .await;
    app.post_json_auth(
        "/api/service/addservice",
        &token,
        &service_body(service_type_id, "2026-09-13", "Youth Hall"),
    )
    .await;

    let (_, by_location) = app.get_auth("/api/service/getservices?location=Youth", &token).await;
    assert_eq!(by_location["data"].as_array().unwrap().len(), 1);
    assert_eq!(by_location["data"][0]["location"], "Youth Hall");

    let (_, by_date) =
        app.get_auth("/api/service/getservices?date_event=2026-09-06", &token).await;
    assert_eq!(by_date["data"].as_array().unwrap().len(), 1);

    let (_, none) = app.get_auth("/api/service/getservices?location=Chapel", &token).await;
    assert_eq!(none["success"], false);
    assert_eq!(none["message"], "No data was found");
}

#[tokio::test]
async fn update_service_patches_location_and_stamps_the_modifier() {
    let app = TestApp::spawn().await;
    let (token, service_type_id) = setup(&app).await;

    let (_, created) = app
        .post_json_auth(
            "/api/service/addservice",
            &token,
            &service_body(service_type_id, "2026-09-06", "Main Auditorium"),
        )
        .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (_, updated) = app
        .put_json_auth(
            &format!("/api/service/updateservice/{id}"),
            &token,
            &json!({ "location": "Overflow Tent" }),
        )
        .await;

    assert_eq!(updated["success"], true);
    assert_eq!(updated["data"]["location"], "Overflow Tent");
    assert_eq!(updated["data"]["date_event"], "2026-09-06");
    assert!(updated["data"]["modifiedon"].as_str().is_some());

    let (_, fetched) = app.get_auth(&format!("/api/service/getservicebyid/{id}"), &token).await;
    assert_eq!(fetched["data"]["modifiedby"], "admin@example.com");
}

#[tokio::test]
async fn missing_service_reports_no_entry() {
    let app = TestApp::spawn().await;
    let token = authed_admin(&app).await;

    let (_, fetched) = app.get_auth("/api/service/getservicebyid/99", &token).await;
    assert_eq!(fetched["success"], false);

    let (_, deleted) = app.delete_auth("/api/service/deleteservice/99", &token).await;
    assert_eq!(deleted["success"], false);
    assert_eq!(deleted["message"], "No data was found");
}
