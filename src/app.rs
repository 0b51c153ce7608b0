use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{extract::State, middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    attendance_types, attendances, members, service_types, services, titles, token, users,
    AppState,
};
use crate::middleware::require_user;

pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(member_routes())
        .merge(service_type_routes())
        .merge(service_routes())
        .merge(attendance_type_routes())
        .merge(attendance_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/token", post(token::login))
        .merge(user_routes())
        .merge(title_routes())
        // Bearer-token gated
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/get_users", get(users::get_users).post(users::get_users))
        .route("/api/user/add_user", post(users::add_user))
        .route("/api/user/update_user/:id", put(users::update_user))
        .route("/api/user/delete_user/:id", delete(users::delete_user))
        .route("/api/user/enable_disable/:id", put(users::enable_disable_user))
        .route("/api/user/forgotten_password", put(users::forgotten_password))
        .route("/api/user/reset_password/:id", put(users::reset_password))
}

fn title_routes() -> Router<AppState> {
    Router::new()
        .route("/api/titles/getAll", get(titles::get_titles))
        .route("/api/titles/getbyId/:title_id", get(titles::get_title_by_id))
        .route("/api/titles/addtitle", post(titles::add_title))
        .route("/api/titles/updatetitle/:id", put(titles::update_title))
        .route("/api/titles/deletetitle/:id", delete(titles::remove_title))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/api/membersroute/get_members", get(members::get_members))
        .route("/api/membersroute/get_member_byId/:member_id", get(members::get_member_by_id))
        .route("/api/membersroute/add_member", post(members::add_member))
        .route("/api/membersroute/update_member/:id", put(members::update_member))
        .route("/api/membersroute/delete_member/:id", delete(members::delete_member))
}

fn service_type_routes() -> Router<AppState> {
    Router::new()
        .route("/api/servicetype/getservicetypes", get(service_types::get_service_types))
        .route("/api/servicetype/getservicebyid/:id", get(service_types::get_service_type_by_id))
        .route("/api/servicetype/addservicetype", post(service_types::add_service_type))
        .route("/api/servicetype/updateservicetype/:id", put(service_types::update_service_type))
        .route("/api/servicetype/deleteservicetype/:id", delete(service_types::remove_service_type))
}

fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/api/service/getservices", get(services::get_services))
        .route("/api/service/getservicebyid/:id", get(services::get_service_by_id))
        .route("/api/service/addservice", post(services::add_service))
        .route("/api/service/updateservice/:id", put(services::update_service))
        .route("/api/service/deleteservice/:id", delete(services::delete_service))
}

fn attendance_type_routes() -> Router<AppState> {
    Router::new()
        .route("/api/attendancetype/getAll", get(attendance_types::get_attendance_types))
        .route("/api/attendancetype/getbyId/:id", get(attendance_types::get_attendance_type_by_id))
        .route("/api/attendancetype/addattendancetype", post(attendance_types::add_attendance_type))
        .route(
            "/api/attendancetype/updateattendancetype/:id",
            put(attendance_types::update_attendance_type),
        )
        .route(
            "/api/attendancetype/deleteattendancetype/:id",
            delete(attendance_types::remove_attendance_type),
        )
}

fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/api/attendance/get_attendances", get(attendances::get_attendances))
        .route("/api/attendance/get_attendance_byId/:id", get(attendances::get_attendance_by_id))
        .route("/api/attendance/add_attendance", post(attendances::add_attendance))
        .route("/api/attendance/update_attendance/:id", put(attendances::update_attendance))
        .route("/api/attendance/delete_attendance/:id", delete(attendances::delete_attendance))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Flock API",
            "version": version,
            "description": "Membership and attendance management backend",
            "endpoints": {
                "token": "/token (public - token acquisition)",
                "users": "/api/user/* (public - administrator management)",
                "titles": "/api/titles/* (public)",
                "members": "/api/membersroute/* (bearer token)",
                "servicetypes": "/api/servicetype/* (bearer token)",
                "services": "/api/service/* (bearer token)",
                "attendancetypes": "/api/attendancetype/* (bearer token)",
                "attendances": "/api/attendance/* (bearer token)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": err.to_string() }
            })),
        ),
    }
}
