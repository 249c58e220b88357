mod error;
mod models;
mod repositories;
mod store;
#[cfg(test)]
pub mod memory;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config;

pub use error::DatabaseError;
pub use models::*;
pub use store::{PgStore, SchedulingStore, SessionStore};

/// Initialize the database connection pool and run pending migrations
pub async fn init_pool() -> Result<PgPool> {
    let config = config::get();
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections.unwrap_or(10))
        .min_connections(config.database.min_connections.unwrap_or(1))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(DatabaseError::from)
        .context("Failed to run database migrations")?;

    info!("Database pool ready");
    Ok(pool)
}
