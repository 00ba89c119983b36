//! Earth Engine configuration parsed from environment variables.

use super::types::EarthEngineError;

pub const DEFAULT_EE_BASE_URL: &str = "https://earthengine.googleapis.com";
pub const DEFAULT_EE_PROJECT: &str = "earthengine-legacy";
pub const DEFAULT_EE_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_EE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarthEngineTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarthEngineConfig {
    pub api_key: String,
    pub base_url: String,
    pub project: String,
    pub timeouts: EarthEngineTimeouts,
}

impl EarthEngineConfig {
    /// Build typed Earth Engine config from environment variables.
    ///
    /// Required:
    /// - `EE_API_KEY_ENV` (names the env var containing the key)
    ///
    /// Optional:
    /// - `EE_BASE_URL`: default `https://earthengine.googleapis.com`
    /// - `EE_PROJECT`: default `earthengine-legacy`
    /// - `EE_REQUEST_TIMEOUT_SECS`: default 60
    /// - `EE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// A timeout that is not a positive integer is ignored (with a warning)
    /// and the default is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the key variable is unset or empty, or if
    /// `EE_PROJECT` is empty or contains `/`.
    pub fn from_env() -> Result<Self, EarthEngineError> {
        let key_var = std::env::var("EE_API_KEY_ENV")
            .map_err(|_| EarthEngineError::MissingApiKey { var: "EE_API_KEY_ENV".into() })?;
        let api_key = std::env::var(&key_var).map_err(|_| EarthEngineError::MissingApiKey { var: key_var.clone() })?;
        if api_key.trim().is_empty() {
            return Err(EarthEngineError::MissingApiKey { var: key_var });
        }

        let base_url = std::env::var("EE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_EE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let project = parse_project(std::env::var("EE_PROJECT").ok().as_deref())?;
        let timeouts = EarthEngineTimeouts {
            request_secs: env_timeout_secs("EE_REQUEST_TIMEOUT_SECS", DEFAULT_EE_REQUEST_TIMEOUT_SECS),
            connect_secs: env_timeout_secs("EE_CONNECT_TIMEOUT_SECS", DEFAULT_EE_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, base_url, project, timeouts })
    }

    /// `value:compute` endpoint for the configured project.
    #[must_use]
    pub fn compute_url(&self) -> String {
        format!("{}/v1beta/projects/{}/value:compute", self.base_url, self.project)
    }
}

/// Positive whole seconds from `key`, else `default`. Zero would make every
/// request time out immediately.
fn env_timeout_secs(key: &str, default: u64) -> u64 {
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        _ => {
            tracing::warn!(key, value = %raw, default, "ignoring invalid timeout");
            default
        }
    }
}

fn parse_project(raw: Option<&str>) -> Result<String, EarthEngineError> {
    let project = raw.unwrap_or(DEFAULT_EE_PROJECT).trim();
    if project.is_empty() || project.contains('/') {
        return Err(EarthEngineError::ConfigParse(format!("invalid EE_PROJECT: '{project}'")));
    }
    Ok(project.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
