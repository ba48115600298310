//! Database access layer for habitd-streak.
//!
//! The engine only ever writes one table (`streak_records`); everything
//! else is read-only fact collection over tables owned by the CRUD
//! collaborators. Dates are stored as `TEXT 'YYYY-MM-DD'` so range scans
//! compare lexicographically, and ids as uuid TEXT.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use habitd_common::Result;

pub mod intentions;
pub mod routines;
pub mod streak_records;
pub mod tasks;

/// Open the habit database, creating the file if necessary.
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// In-memory database for tests and local experiments.
///
/// Capped at one connection: each SQLite `:memory:` connection is its own
/// database, so a larger pool would hand out empty databases.
pub async fn connect_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    Ok(pool)
}

/// Create the engine's tables when absent. Idempotent; runs at startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS routines (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT,
            frequency TEXT NOT NULL DEFAULT 'daily',
            created_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS routine_completions (
            routine_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            completed_on TEXT NOT NULL,
            UNIQUE (routine_id, completed_on)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            scheduled_on TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_intentions (
            user_id TEXT NOT NULL,
            intention_on TEXT NOT NULL,
            PRIMARY KEY (user_id, intention_on)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS streak_records (
            user_id TEXT PRIMARY KEY,
            current_streak INTEGER NOT NULL DEFAULT 0,
            longest_streak INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}
