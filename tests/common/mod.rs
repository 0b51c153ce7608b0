#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use flock_api::app::app;
use flock_api::config::AppConfig;
use flock_api::database::schema;
use flock_api::handlers::AppState;

pub const RESET_PASSWORD: &str = "Reset@1234";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        secret_key: "integration-test-secret".into(),
        algorithm: Algorithm::HS256,
        access_token_expire_minutes: 30,
        reset_password: RESET_PASSWORD.into(),
    }
}

/// Full application wired to a private in-memory database. Requests are
/// driven straight through the router, no listener involved.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // One connection, otherwise each pool checkout would see its own
        // empty in-memory database.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("connect options")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("in-memory pool");
        schema::migrate(&pool).await.expect("migrate");

        let state = AppState { pool: pool.clone(), config: Arc::new(test_config()) };
        Self { router: app(state), pool }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("infallible router");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    fn builder(method: &str, path: &str, token: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Self::builder("GET", path, None).body(Body::empty()).expect("request");
        self.send(request).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let request =
            Self::builder("GET", path, Some(token)).body(Body::empty()).expect("request");
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.json_request("POST", path, None, body).await
    }

    pub async fn post_json_auth(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.json_request("POST", path, Some(token), body).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.json_request("PUT", path, None, body).await
    }

    pub async fn put_json_auth(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.json_request("PUT", path, Some(token), body).await
    }

    pub async fn put(&self, path: &str) -> (StatusCode, Value) {
        let request = Self::builder("PUT", path, None).body(Body::empty()).expect("request");
        self.send(request).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let request = Self::builder("DELETE", path, None).body(Body::empty()).expect("request");
        self.send(request).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let request =
            Self::builder("DELETE", path, Some(token)).body(Body::empty()).expect("request");
        self.send(request).await
    }

    pub async fn post_form(&self, path: &str, form: &str) -> (StatusCode, Value) {
        let request = Self::builder("POST", path, None)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        self.send(request).await
    }

    async fn json_request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let request = Self::builder(method, path, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }
}

/// Registers an administrator and returns the created row.
pub async fn add_user(app: &TestApp, email: &str, password: &str) -> Value {
    let body = serde_json::json!({
        "firstname": "Jane",
        "middlename": "A",
        "lastname": "Doe",
        "gender": "female",
        "phonenumber": "0240000000",
        "emailaddress": email,
        "password": password,
    });
    let (status, response) = app.post_json("/api/user/add_user", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true, "add_user failed: {response}");
    response["data"].clone()
}

/// Exchanges credentials for a bearer token via the password grant.
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let form = format!("username={email}&password={password}");
    let (status, response) = app.post_form("/token", &form).await;
    assert_eq!(status, StatusCode::OK, "login failed: {response}");
    response["access_token"].as_str().expect("access_token").to_string()
}

/// Registers an administrator and logs them in, returning their token.
pub async fn authed_admin(app: &TestApp) -> String {
    add_user(app, "admin@example.com", "hunter2").await;
    login(app, "admin@example.com", "hunter2").await
}
