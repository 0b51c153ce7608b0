use sqlx::SqlitePool;

/// Profile pictures are capped at 5 MB, enforced both here and before insert.
pub const MAX_PROFILE_PICTURE_BYTES: usize = 5 * 1024 * 1024;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        firstname TEXT NOT NULL,
        middlename TEXT NOT NULL,
        lastname TEXT NOT NULL,
        gender TEXT NOT NULL,
        phonenumber TEXT NOT NULL,
        emailaddress TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        disabled INTEGER NOT NULL DEFAULT 0,
        createdon TEXT NOT NULL,
        modifiedon TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS titles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title_name TEXT NOT NULL UNIQUE,
        createdon TEXT NOT NULL,
        modifiedon TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        firstname TEXT NOT NULL,
        lastname TEXT NOT NULL,
        middlename TEXT NOT NULL,
        gender TEXT NOT NULL,
        emailaddress TEXT NOT NULL UNIQUE,
        phonenumber TEXT NOT NULL,
        dob TEXT NOT NULL,
        profile_picture BLOB,
        house_address TEXT NOT NULL,
        title_id INTEGER NOT NULL REFERENCES titles(id),
        createdby INTEGER NOT NULL REFERENCES users(id),
        createdon TEXT NOT NULL,
        modifiedon TEXT,
        modifiedby INTEGER,
        CHECK (profile_picture IS NULL OR LENGTH(profile_picture) <= 5242880)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS servicetypes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        createdby INTEGER NOT NULL REFERENCES users(id),
        createdon TEXT NOT NULL,
        modifiedon TEXT,
        modifiedby INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        servicetypeid INTEGER NOT NULL REFERENCES servicetypes(id),
        date_event TEXT NOT NULL,
        time_start TEXT NOT NULL,
        location TEXT NOT NULL,
        createdby INTEGER NOT NULL REFERENCES users(id),
        createdon TEXT NOT NULL,
        modifiedon TEXT,
        modifiedby INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendancetypes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        createdby INTEGER NOT NULL REFERENCES users(id),
        createdon TEXT NOT NULL,
        modifiedon TEXT,
        modifiedby INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendances (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        memberid INTEGER NOT NULL REFERENCES members(id),
        serviceid INTEGER NOT NULL REFERENCES services(id),
        attendancestatusid INTEGER NOT NULL REFERENCES attendancetypes(id),
        createdon TEXT NOT NULL,
        modifiedon TEXT,
        modifiedby INTEGER
    )
    "#,
];

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "attendances",
                "attendancetypes",
                "members",
                "services",
                "servicetypes",
                "titles",
                "users"
            ]
        );
    }

    // Users and titles are managed over unauthenticated routes, so no
    // modifier identity exists to record for them.
    #[tokio::test]
    async fn modifier_column_exists_only_where_requests_carry_an_identity() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();

        for (table, expected) in [
            ("users", false),
            ("titles", false),
            ("members", true),
            ("servicetypes", true),
            ("services", true),
            ("attendancetypes", true),
            ("attendances", true),
        ] {
            let columns: Vec<(String,)> =
                sqlx::query_as(&format!("SELECT name FROM pragma_table_info('{table}')"))
                    .fetch_all(&pool)
                    .await
                    .unwrap();
            let has_modifiedby = columns.iter().any(|(name,)| name == "modifiedby");
            assert_eq!(has_modifiedby, expected, "table {table}");
        }
    }

    #[tokio::test]
    async fn storage_rejects_oversized_profile_picture() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrate(&pool).await.unwrap();

        sqlx::query(
            "INSERT INTO users (firstname, middlename, lastname, gender, phonenumber, emailaddress, password, createdon) \
             VALUES ('a', 'b', 'c', 'male', '0', 'seed@example.com', 'x', '2024-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO titles (title_name, createdon) VALUES ('Member', '2024-01-01T00:00:00Z')")
            .execute(&pool)
            .await
            .unwrap();

        let oversized = vec![0u8; MAX_PROFILE_PICTURE_BYTES + 1];
        let result = sqlx::query(
            "INSERT INTO members (firstname, lastname, middlename, gender, emailaddress, phonenumber, dob, \
             profile_picture, house_address, title_id, createdby, createdon) \
             VALUES ('a', 'b', 'c', 'female', 'm@example.com', '0', '2000-01-01', ?, 'addr', 1, 1, '2024-01-01T00:00:00Z')",
        )
        .bind(oversized)
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
