//! Earth Engine — remote vegetation data source.
//!
//! DESIGN
//! ======
//! `VegetationSource` is the seam the analysis service depends on. The
//! production implementation is `EarthEngineClient`, built from
//! `EarthEngineConfig::from_env`; when configuration fails (missing
//! credential, bad value, client build) the service runs with
//! `UnconfiguredSource`, which replays that error on every fetch, and every
//! analysis degrades to demo data instead of refusing to start.

pub mod client;
pub mod config;
pub mod expression;
pub mod parse;
pub mod types;

use std::sync::Arc;

pub use client::EarthEngineClient;
pub use config::EarthEngineConfig;
pub use parse::{ParseError, parse_timeline};
pub use types::{AnalysisQuery, EarthEngineError, UnconfiguredSource, VegetationSource};

/// Build the data source from environment variables, falling back to
/// `UnconfiguredSource` carrying the configuration error.
#[must_use]
pub fn source_from_env() -> Arc<dyn VegetationSource> {
    let built = EarthEngineConfig::from_env().and_then(EarthEngineClient::new);
    match built {
        Ok(client) => {
            tracing::info!(url = client.compute_url(), "earth engine client initialized");
            Arc::new(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "earth engine not configured, analyses will use demo data");
            Arc::new(UnconfiguredSource::new(e))
        }
    }
}

#[cfg(test)]
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Serializes tests that mutate the `EE_*` env vars.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
