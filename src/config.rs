//! Environment-derived configuration.

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Server and database settings. `DATABASE_URL` is required; the rest have
/// defaults.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(v) => v.parse().map_err(|_| ConfigError::InvalidVar {
                var: "DB_MAX_CONNECTIONS",
                value: v.clone(),
            })?,
            Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
        };
        Ok(Config {
            database_url,
            bind_addr,
            db_max_connections,
        })
    }
}
