// src/config/db.rs
// DOCUMENTATION: Connection settings and pool setup for the db backend
// PURPOSE: Build the PostgreSQL pool handed to PgStore

use crate::config::Config;
use crate::errors::PlacesError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const IDLE_TIMEOUT_SECS: u64 = 300;
const MAX_LIFETIME_SECS: u64 = 1800;

/// The part of `Config` the db backend needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.database_url.clone(),
            max_connections: config.db_max_connections,
            acquire_timeout: Duration::from_secs(config.db_connection_timeout),
        }
    }

    /// Connection string with the password masked, for logs
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };

        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.url.clone(),
        }
    }
}

/// Connect and ping the object database
/// DOCUMENTATION: Only called when HBNB_TYPE_STORAGE=db; a failed ping is
/// reported the same way as a failed connect
pub async fn init_db_pool(settings: &DbSettings) -> Result<PgPool, PlacesError> {
    let target = settings.redacted_url();
    log::info!("Connecting to {}", target);

    let storage = |e: sqlx::Error| {
        log::error!("Database {} unavailable: {}", target, e);
        PlacesError::Storage(e.to_string())
    };

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(Duration::from_secs(IDLE_TIMEOUT_SECS))
        .max_lifetime(Duration::from_secs(MAX_LIFETIME_SECS))
        .connect(&settings.url)
        .await
        .map_err(storage)?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(storage)?;

    log::info!(
        "Database pool ready (max {} connections)",
        settings.max_connections
    );
    Ok(pool)
}
