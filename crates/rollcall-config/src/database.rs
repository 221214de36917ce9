//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string. When unset the server
//!   falls back to the in-process store.
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DATABASE_CONNECT_TIMEOUT`: seconds to wait for a connection (default: 10)

use std::time::Duration;

use crate::{env_lookup, parse_or};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT",
                10,
            )),
        }
    }
}
