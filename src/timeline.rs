//! Normalized per-year vegetation timeline.
//!
//! DESIGN
//! ======
//! `TimelineDataset` keeps its three series private and only hands out
//! slices, so the equal-length / ascending-years invariant established in
//! `new` cannot be broken afterwards.

use serde::Serialize;

use crate::error::ErrorCode;

const FALLBACK_YEARS: [i32; 6] = [2018, 2019, 2020, 2021, 2022, 2023];
const FALLBACK_NDVI: [f64; 6] = [0.85, 0.82, 0.78, 0.72, 0.68, 0.65];
const FALLBACK_FOREST_LOSS: [f64; 6] = [0.0, 3.0, 7.0, 12.0, 17.0, 22.0];

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("series lengths differ: years={years}, ndvi={ndvi}, forest_loss={forest_loss}")]
    LengthMismatch { years: usize, ndvi: usize, forest_loss: usize },
    #[error("years must be strictly ascending (saw {previous} then {next})")]
    YearsNotAscending { previous: i32, next: i32 },
    #[error("forest loss {0} outside [0, 100]")]
    ForestLossOutOfRange(f64),
    #[error("non-finite NDVI value for {0}")]
    NonFiniteNdvi(i32),
}

impl ErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "E_DATASET_LENGTH",
            Self::YearsNotAscending { .. } => "E_DATASET_YEARS",
            Self::ForestLossOutOfRange(_) => "E_DATASET_FOREST_LOSS",
            Self::NonFiniteNdvi(_) => "E_DATASET_NDVI",
        }
    }
}

// =============================================================================
// DATASET
// =============================================================================

/// Index-aligned (year, NDVI, forest-loss-percent) series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineDataset {
    years: Vec<i32>,
    ndvi_values: Vec<f64>,
    forest_loss_percent: Vec<f64>,
}

impl TimelineDataset {
    /// Build a dataset, enforcing equal lengths, strictly ascending years,
    /// finite NDVI and forest loss within [0, 100].
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found.
    pub fn new(years: Vec<i32>, ndvi_values: Vec<f64>, forest_loss_percent: Vec<f64>) -> Result<Self, DatasetError> {
        if years.len() != ndvi_values.len() || years.len() != forest_loss_percent.len() {
            return Err(DatasetError::LengthMismatch {
                years: years.len(),
                ndvi: ndvi_values.len(),
                forest_loss: forest_loss_percent.len(),
            });
        }
        for pair in years.windows(2) {
            if pair[1] <= pair[0] {
                return Err(DatasetError::YearsNotAscending { previous: pair[0], next: pair[1] });
            }
        }
        for (year, ndvi) in years.iter().zip(&ndvi_values) {
            if !ndvi.is_finite() {
                return Err(DatasetError::NonFiniteNdvi(*year));
            }
        }
        if let Some(bad) = forest_loss_percent
            .iter()
            .find(|loss| !(0.0..=100.0).contains(*loss))
        {
            return Err(DatasetError::ForestLossOutOfRange(*bad));
        }
        Ok(Self { years, ndvi_values, forest_loss_percent })
    }

    #[must_use]
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    #[must_use]
    pub fn ndvi_values(&self) -> &[f64] {
        &self.ndvi_values
    }

    #[must_use]
    pub fn forest_loss_percent(&self) -> &[f64] {
        &self.forest_loss_percent
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Fixed demo series rendered whenever real data is unavailable.
#[must_use]
pub fn fallback_dataset() -> TimelineDataset {
    TimelineDataset {
        years: FALLBACK_YEARS.to_vec(),
        ndvi_values: FALLBACK_NDVI.to_vec(),
        forest_loss_percent: FALLBACK_FOREST_LOSS.to_vec(),
    }
}

// =============================================================================
// PROVENANCE
// =============================================================================

/// Where a rendered dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataProvenance {
    Live,
    Fallback { reason: String },
}

impl DataProvenance {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

#[cfg(test)]
#[path = "timeline_test.rs"]
mod tests;
