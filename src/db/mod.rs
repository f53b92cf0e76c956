use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Error, Executor, PgPool};
use thiserror::Error;

pub mod models;
pub mod time_of_day;

const CREATE_MEDICINES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS medicines (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        dosage VARCHAR(255) NOT NULL,
        frequency VARCHAR(255) NOT NULL,
        time_of_day VARCHAR(255) NOT NULL,
        start_date TIMESTAMPTZ NOT NULL,
        end_date TIMESTAMPTZ NOT NULL,
        notes TEXT,
        created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
    )
"#;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to parse database URL: {0}")]
    UrlParse(String),
    #[error("Database error: {0}")]
    Sqlx(#[from] Error),
    #[error("Failed to create database: {0}")]
    CreateDb(String),
    #[error("Failed to create medicines table: {0}")]
    CreateTable(String),
}

/// Pool sizing for [`init_db`].
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Opens the pool for `database_url`, creating the database and the
/// `medicines` table when they are missing.
pub async fn init_db(database_url: &str, settings: PoolSettings) -> Result<PgPool, DatabaseError> {
    let (server_url, db_name) = parse_database_url(database_url)?;

    let temp_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&server_url)
        .await
        .map_err(DatabaseError::Sqlx)?;

    ensure_database_exists(&temp_pool, &db_name).await?;
    temp_pool.close().await;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
        .map_err(DatabaseError::Sqlx)?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(DatabaseError::Sqlx)?;

    ensure_schema(&pool).await?;

    log::info!("Database connection established successfully");
    Ok(pool)
}

/// Idempotently creates the `medicines` table.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    pool.execute(CREATE_MEDICINES_TABLE)
        .await
        .map_err(|e| DatabaseError::CreateTable(e.to_string()))?;
    Ok(())
}

/// Splits a connection URL into a URL for the server's `postgres` maintenance
/// database (keeping any query string) and the target database name.
fn parse_database_url(database_url: &str) -> Result<(String, String), DatabaseError> {
    let (base_url, path) = database_url
        .rsplit_once('/')
        .filter(|(base, _)| base.contains("://") && !base.ends_with('/'))
        .ok_or_else(|| DatabaseError::UrlParse("Invalid database URL format".to_string()))?;

    let (db_name, query) = match path.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (path, None),
    };

    if db_name.is_empty() {
        return Err(DatabaseError::UrlParse(
            "Failed to extract database name".to_string(),
        ));
    }

    let server_url = match query {
        Some(query) => format!("{}/postgres?{}", base_url, query),
        None => format!("{}/postgres", base_url),
    };

    Ok((server_url, db_name.to_string()))
}

async fn ensure_database_exists(pool: &PgPool, db_name: &str) -> Result<(), DatabaseError> {
    let db_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::Sqlx)?;

    if !db_exists {
        log::info!("Creating database {}", db_name);
        pool.execute(format!("CREATE DATABASE {}", quote_identifier(db_name)).as_str())
            .await
            .map_err(|e| DatabaseError::CreateDb(e.to_string()))?;
    }

    Ok(())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_url_with_query() {
        let (server, name) =
            parse_database_url("postgres://u:p@localhost:5432/medicine_reminder?sslmode=disable")
                .unwrap();
        assert_eq!(server, "postgres://u:p@localhost:5432/postgres?sslmode=disable");
        assert_eq!(name, "medicine_reminder");
    }

    #[test]
    fn splits_url_without_query() {
        let (server, name) = parse_database_url("postgres://localhost/reminders").unwrap();
        assert_eq!(server, "postgres://localhost/postgres");
        assert_eq!(name, "reminders");
    }

    #[test]
    fn rejects_url_without_database() {
        assert!(matches!(
            parse_database_url("postgres://localhost/"),
            Err(DatabaseError::UrlParse(_))
        ));
        assert!(matches!(
            parse_database_url("postgres://localhost"),
            Err(DatabaseError::UrlParse(_))
        ));
        assert!(matches!(
            parse_database_url("not a url"),
            Err(DatabaseError::UrlParse(_))
        ));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_identifier("reminders"), "\"reminders\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn init_db_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = init_db(&url, PoolSettings::default()).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM information_schema.tables WHERE table_name = 'medicines')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists);
    }
}
