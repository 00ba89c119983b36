//! Earth Engine `value:compute` client.
//!
//! Thin HTTP wrapper: one POST per query, no retry. The JSON payload is
//! returned as-is; interpretation lives in `parse`.

use std::time::Duration;

use super::config::EarthEngineConfig;
use super::types::{AnalysisQuery, EarthEngineError, VegetationSource};

const FILE_FORMAT: &str = "JSON";

// =============================================================================
// CLIENT
// =============================================================================

pub struct EarthEngineClient {
    http: reqwest::Client,
    api_key: String,
    compute_url: String,
}

impl EarthEngineClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: EarthEngineConfig) -> Result<Self, EarthEngineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| EarthEngineError::HttpClientBuild(e.to_string()))?;
        let compute_url = config.compute_url();
        Ok(Self { http, api_key: config.api_key, compute_url })
    }

    #[must_use]
    pub fn compute_url(&self) -> &str {
        &self.compute_url
    }
}

#[async_trait::async_trait]
impl VegetationSource for EarthEngineClient {
    async fn fetch(&self, query: &AnalysisQuery) -> Result<serde_json::Value, EarthEngineError> {
        let body = ComputeRequest { expression: query.expression(), file_format: FILE_FORMAT };

        let response = self
            .http
            .post(&self.compute_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| EarthEngineError::ApiRequest(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| EarthEngineError::ApiRequest(e.without_url().to_string()))?;

        if !(200..300).contains(&status) {
            return Err(EarthEngineError::ApiResponse { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| EarthEngineError::ApiParse(e.to_string()))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRequest<'a> {
    expression: &'a str,
    file_format: &'a str,
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
