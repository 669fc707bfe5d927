//! Environment-driven configuration.

use crate::error::{Error, Result};

/// Database settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection URL (`DATABASE_URL`).
    pub database_url: String,
    /// Maximum pool size (`DATABASE_POOL_SIZE`, default 16).
    pub pool_size: usize,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if
    /// one exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Connection("DATABASE_URL is not set".to_string()))?;
        let pool_size = std::env::var("DATABASE_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(16);
        Ok(Self {
            database_url,
            pool_size,
        })
    }

    /// Build a connection pool from these settings.
    #[cfg(feature = "pool")]
    pub fn create_pool(&self) -> Result<deadpool_postgres::Pool> {
        crate::pool::create_pool_with_config(&self.database_url, self.pool_size)
    }
}
