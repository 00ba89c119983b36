//! Earth Engine types — query, errors and the data-source trait.

use time::Date;
use time::macros::date;

use crate::error::ErrorCode;
use crate::geo::Region;

/// First day of the analysed period.
pub const ANALYSIS_START: Date = date!(2018 - 01 - 01);
/// Last day of the analysed period.
pub const ANALYSIS_END: Date = date!(2023 - 12 - 31);

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while fetching data from Earth Engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EarthEngineError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// No credential is configured.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Earth Engine returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body was not JSON.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for EarthEngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// A region-bounded, date-ranged NDVI request. Built once per analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisQuery {
    region: Region,
    start: Date,
    end: Date,
    expression: String,
}

impl AnalysisQuery {
    /// Query over the fixed analysis period.
    #[must_use]
    pub fn for_region(region: Region) -> Self {
        let expression = super::expression::ndvi_expression(&region, ANALYSIS_START, ANALYSIS_END);
        Self { region, start: ANALYSIS_START, end: ANALYSIS_END, expression }
    }

    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Computation expression sent to `value:compute`.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

// =============================================================================
// DATA SOURCE TRAIT
// =============================================================================

/// Remote vegetation data source. Enables mocking in tests.
///
/// Implementations return the provider's JSON payload untouched; turning it
/// into a timeline is the parser's job.
#[async_trait::async_trait]
pub trait VegetationSource: Send + Sync {
    async fn fetch(&self, query: &AnalysisQuery) -> Result<serde_json::Value, EarthEngineError>;
}

/// Source used when Earth Engine could not be configured. Every fetch fails
/// with the configuration error, so every analysis degrades to demo data.
pub struct UnconfiguredSource {
    cause: EarthEngineError,
}

impl UnconfiguredSource {
    #[must_use]
    pub fn new(cause: EarthEngineError) -> Self {
        Self { cause }
    }

    /// No credential in `var`.
    #[must_use]
    pub fn missing_key(var: impl Into<String>) -> Self {
        Self::new(EarthEngineError::MissingApiKey { var: var.into() })
    }

    #[must_use]
    pub fn cause(&self) -> &EarthEngineError {
        &self.cause
    }
}

#[async_trait::async_trait]
impl VegetationSource for UnconfiguredSource {
    async fn fetch(&self, _query: &AnalysisQuery) -> Result<serde_json::Value, EarthEngineError> {
        Err(self.cause.clone())
    }
}
