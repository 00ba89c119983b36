//! Earth Engine response → `TimelineDataset`.
//!
//! DESIGN
//! ======
//! Pure function over `serde_json::Value`, kept apart from the fallback
//! policy so the orchestrator can treat every `ParseError` the same way as a
//! transport failure.
//!
//! The accepted shape is a feature collection (top level or under `result`)
//! whose features carry `system:time_start` (epoch ms) and a numeric `NDVI`
//! property, i.e. per-image regional means. A raw image collection describes
//! NDVI as a band rather than a property, so it is rejected with
//! `MissingNdvi`.

use std::collections::BTreeMap;

use serde_json::Value;
use time::OffsetDateTime;

use crate::error::ErrorCode;
use crate::timeline::{DatasetError, TimelineDataset};

const TIME_START_KEY: &str = "system:time_start";
const NDVI_KEY: &str = "NDVI";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("response has no feature list")]
    MissingFeatures,
    #[error("response contains no features")]
    Empty,
    #[error("feature {index} has no system:time_start")]
    MissingTimestamp { index: usize },
    #[error("feature {index} has an out-of-range timestamp {millis}")]
    InvalidTimestamp { index: usize, millis: i64 },
    #[error("feature {index} has no numeric NDVI property")]
    MissingNdvi { index: usize },
    #[error("feature {index} has a non-finite NDVI value")]
    NonFiniteNdvi { index: usize },
    #[error("baseline NDVI {0} is not positive")]
    NonPositiveBaseline(f64),
    #[error("dataset invariant violated: {0}")]
    Dataset(#[from] DatasetError),
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFeatures => "E_PARSE_NO_FEATURES",
            Self::Empty => "E_PARSE_EMPTY",
            Self::MissingTimestamp { .. } => "E_PARSE_NO_TIMESTAMP",
            Self::InvalidTimestamp { .. } => "E_PARSE_TIMESTAMP",
            Self::MissingNdvi { .. } => "E_PARSE_NO_NDVI",
            Self::NonFiniteNdvi { .. } => "E_PARSE_NDVI",
            Self::NonPositiveBaseline(_) => "E_PARSE_BASELINE",
            Self::Dataset(e) => e.error_code(),
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Convert a `value:compute` payload into a per-year timeline.
///
/// NDVI is averaged per UTC calendar year. Forest loss for each year is the
/// relative NDVI drop against the first year, clamped to [0, 100].
///
/// # Errors
///
/// Returns a `ParseError` when the payload does not have the accepted shape.
pub fn parse_timeline(payload: &Value) -> Result<TimelineDataset, ParseError> {
    let features = payload
        .get("result")
        .unwrap_or(payload)
        .get("features")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingFeatures)?;
    if features.is_empty() {
        return Err(ParseError::Empty);
    }

    // year -> (sum, count)
    let mut per_year: BTreeMap<i32, (f64, u32)> = BTreeMap::new();
    for (index, feature) in features.iter().enumerate() {
        let properties = feature.get("properties");
        let millis = properties
            .and_then(|p| p.get(TIME_START_KEY))
            .and_then(Value::as_i64)
            .ok_or(ParseError::MissingTimestamp { index })?;
        let ndvi = properties
            .and_then(|p| p.get(NDVI_KEY))
            .and_then(Value::as_f64)
            .ok_or(ParseError::MissingNdvi { index })?;
        if !ndvi.is_finite() {
            return Err(ParseError::NonFiniteNdvi { index });
        }

        let year = year_of(millis).ok_or(ParseError::InvalidTimestamp { index, millis })?;
        let entry = per_year.entry(year).or_insert((0.0, 0));
        entry.0 += ndvi;
        entry.1 += 1;
    }

    let years: Vec<i32> = per_year.keys().copied().collect();
    let ndvi_values: Vec<f64> = per_year
        .values()
        .map(|(sum, count)| sum / f64::from(*count))
        .collect();

    let baseline = ndvi_values[0];
    if baseline <= 0.0 {
        return Err(ParseError::NonPositiveBaseline(baseline));
    }
    let forest_loss_percent = ndvi_values
        .iter()
        .map(|ndvi| ((baseline - ndvi) / baseline * 100.0).clamp(0.0, 100.0))
        .collect();

    Ok(TimelineDataset::new(years, ndvi_values, forest_loss_percent)?)
}

fn year_of(millis: i64) -> Option<i32> {
    OffsetDateTime::from_unix_timestamp(millis.div_euclid(1000))
        .ok()
        .map(OffsetDateTime::year)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
