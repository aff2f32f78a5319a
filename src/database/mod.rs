use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

pub mod models;
pub mod posts;
pub mod profiles;
pub mod users;

pub use posts::PostStore;
pub use profiles::ProfileStore;
pub use users::UserStore;

/// Errors from the document store clients
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connect to the database. Called once at startup; a failure here is fatal
/// for the process.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!("connected to database");
    Ok(pool)
}

/// Create the three collections if they do not exist yet, so a fresh
/// database is usable without an out-of-band migration step.
pub async fn bootstrap(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id              UUID PRIMARY KEY,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            avatar_url      TEXT,
            created_at      TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id              UUID PRIMARY KEY,
            user_id         UUID NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
            company         TEXT,
            location        TEXT,
            website         TEXT,
            status          TEXT NOT NULL,
            skills          TEXT[] NOT NULL,
            bio             TEXT,
            github_username TEXT,
            experience      JSONB NOT NULL DEFAULT '[]',
            education       JSONB NOT NULL DEFAULT '[]',
            social          JSONB NOT NULL DEFAULT '{}',
            created_at      TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id          UUID PRIMARY KEY,
            user_id     UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            avatar      TEXT,
            text        TEXT NOT NULL,
            likes       JSONB NOT NULL DEFAULT '[]',
            comments    JSONB NOT NULL DEFAULT '[]',
            created_at  TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
