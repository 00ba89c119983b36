//! Service configuration parsed from environment variables.
//!
//! Earth Engine settings live in `earthengine::config`; this covers the
//! process-level knobs only.

use crate::error::ErrorCode;
use crate::services::notice::DEFAULT_NOTICE_CAPACITY;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG_PARSE"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub notice_capacity: usize,
}

impl AppConfig {
    /// Optional:
    /// - `PORT`: default 3000
    /// - `NOTICE_CAPACITY`: default 50
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but not a valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            notice_capacity: env_parse("NOTICE_CAPACITY", DEFAULT_NOTICE_CAPACITY)?,
        })
    }
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
