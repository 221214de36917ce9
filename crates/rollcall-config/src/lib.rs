//! # Rollcall Config
//!
//! Configuration types for the Rollcall API, loaded from environment variables.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`database`]: store connection settings
//! - [`server`]: listen address and request timeout
//! - [`cors`]: allowed origins
//! - [`logging`]: log level and log directory
//! - [`password`]: bcrypt work factor
//!
//! Every type offers `from_env()` and a `from_lookup()` variant that reads
//! from an arbitrary key lookup, which keeps the parsing testable.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::LoggingConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is missing or unparsable.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Environment-backed lookup used by every `from_env()`.
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
