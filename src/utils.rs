//! Helper functions shared across the crate.

use crate::config;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::str::FromStr;

/// Opens the pool for the configured database.
pub async fn setup_sqlite_db_pool() -> anyhow::Result<SqlitePool> {
    connect_sqlite_pool(&config::APP_CONFIG.db_host).await
}

/// Opens a pool for `db_host`. `foreign_keys` stays ON: pet deletion relies
/// on the cascade to the child tables.
pub async fn connect_sqlite_pool(db_host: &str) -> anyhow::Result<SqlitePool> {
    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(db_host)?
            .create_if_missing(true)
            .pragma("foreign_keys", "ON"),
    )
    .await?)
}

/// Parses a user-entered amount (cost, weight). Malformed input becomes 0.0
/// instead of an error; a decimal comma is accepted.
pub fn parse_amount_or_zero(input: &str) -> f64 {
    input.trim().replace(',', ".").parse().unwrap_or(0.0)
}
