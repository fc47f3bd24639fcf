use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Broad study areas every major is filed under. Seeded idempotently.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Computing & Information Sciences",
    "Engineering & Technology",
    "Business, Management & Commerce",
    "Natural & Physical Sciences",
    "Health & Medical Sciences",
    "Life Sciences & Biotechnology",
    "Social Sciences",
    "Arts, Humanities & Languages",
    "Law & Legal Studies",
    "Education & Teaching",
    "Media, Communication & Design",
    "Architecture, Planning & Construction",
    "Agriculture, Food & Veterinary Sciences",
    "Hospitality, Tourism & Services",
    "Interdisciplinary & Emerging Fields",
];

/// Creates the SQLite connection pool and brings the schema up to date.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database exists only as long as its single connection.
    let in_memory = database_url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(10)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("Failed to connect to SQLite")?;

    init_schema(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates tables if needed and seeds the category list. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS major_categories (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create major_categories")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS majors (
            id                          INTEGER PRIMARY KEY AUTOINCREMENT,
            name                        TEXT NOT NULL UNIQUE,
            category_id                 INTEGER REFERENCES major_categories(id)
                                            ON DELETE SET NULL ON UPDATE CASCADE,
            academic_strengths_scores   TEXT NOT NULL DEFAULT '{}',
            thinking_style_scores       TEXT NOT NULL DEFAULT '{}',
            learning_style_scores       TEXT NOT NULL DEFAULT '{}',
            interests_scores            TEXT NOT NULL DEFAULT '{}',
            created_at                  TEXT NOT NULL,
            updated_at                  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create majors")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_majors_category ON majors(category_id)")
        .execute(pool)
        .await?;

    for name in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO major_categories (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(*name)
            .execute(pool)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    create_pool("sqlite::memory:")
        .await
        .expect("in-memory database")
}
