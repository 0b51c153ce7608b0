use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use flock_api::app::app;
use flock_api::config::AppConfig;
use flock_api::database;
use flock_api::handlers::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let pool = match database::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("database error: {err}");
            std::process::exit(1);
        }
    };

    let state = AppState { pool, config: Arc::new(config) };
    let router = app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{port}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!("listening on {addr}");

    if let Err(err) = axum::serve(listener, router).await {
        tracing::error!("server error: {err}");
        std::process::exit(1);
    }
}
