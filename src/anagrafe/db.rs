//! Pool construction and schema initialization.
//!
//! Both run once, explicitly, at process start; nothing here happens at
//! import time. The pool is dropped when the serve future resolves, which
//! releases its connections.

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::debug;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL
)";

/// Connect to the database
///
/// # Errors
/// Returns an error if the pool cannot be established
pub async fn connect(dsn: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Create the users table if it does not exist yet
///
/// # Errors
/// Returns an error if the DDL statement fails
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .context("Failed to create users table")?;

    debug!("Schema ready");

    Ok(())
}
