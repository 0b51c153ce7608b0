pub mod models;
pub mod schema;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open the pool and make sure the schema exists. Tables are created at
/// startup if absent; the unique indexes double as the authoritative
/// uniqueness guard behind the handlers' pre-checks.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    schema::migrate(&pool).await?;
    Ok(pool)
}
