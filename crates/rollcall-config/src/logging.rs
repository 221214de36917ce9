use std::path::PathBuf;

use crate::env_lookup;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Default level for the application's own targets
    pub level: String,
    /// Directory for the daily-rolling log files
    pub dir: PathBuf,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("storage/logs")),
        }
    }
}
