use crate::{env_lookup, parse_or};

/// Secret used when `JWT_SECRET` is not set. Only suitable for development.
pub const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 86_400;

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds, clamped to `1..=MAX_TOKEN_EXPIRY` when read
    /// from the environment
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SECRET.to_string()),
            token_expiry: parse_or(&lookup, "JWT_EXPIRY_SECONDS", DEFAULT_TOKEN_EXPIRY)
                .clamp(1, MAX_TOKEN_EXPIRY),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}
