//! Analysis service — selected region → NDVI timeline → renderer.
//!
//! DESIGN
//! ======
//! One run: snapshot the selection, claim the in-progress flag, show the
//! loading indicator, fetch from the vegetation source (the only await that
//! leaves the process), parse, render. Every failure after the precondition
//! checks degrades to the fixed demo dataset plus a notice; only a missing
//! region or an overlapping run is reported as an error, and neither touches
//! the loading indicator or the renderer.
//!
//! TRADE-OFFS
//! ==========
//! No retry and no cancellation token: the first failure goes straight to
//! fallback, and a hung request is bounded only by the HTTP client timeout.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::notice::{BUSY_MESSAGE, FALLBACK_MESSAGE, NO_REGION_MESSAGE, NoticeLevel};
use super::selection;
use crate::earthengine::{AnalysisQuery, EarthEngineError, ParseError, VegetationSource, parse_timeline};
use crate::error::ErrorCode;
use crate::geo::Region;
use crate::state::AppState;
use crate::timeline::{DataProvenance, TimelineDataset, fallback_dataset};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("no region selected")]
    NoRegion,
    #[error("an analysis is already in progress")]
    Busy,
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoRegion => "E_NO_REGION",
            Self::Busy => "E_ANALYSIS_BUSY",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

/// Why a run fell back to demo data.
#[derive(Debug, thiserror::Error)]
pub enum FallbackReason {
    #[error("data source: {0}")]
    Source(#[from] EarthEngineError),
    #[error("response parse: {0}")]
    Parse(#[from] ParseError),
}

impl ErrorCode for FallbackReason {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Source(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Source(e) if e.retryable())
    }
}

/// Outcome of a completed run, live or degraded.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub region: Region,
    pub provenance: DataProvenance,
    pub dataset: TimelineDataset,
}

// =============================================================================
// IN-FLIGHT GUARD
// =============================================================================

/// Holds the in-progress flag for one run; releases it on drop.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one analysis over the current selection and render the result.
///
/// # Errors
///
/// `NoRegion` when nothing is selected, `Busy` when another run is pending.
/// Data-source and parse failures are not errors: they yield a report with
/// `DataProvenance::Fallback`.
pub async fn run_analysis(state: &AppState) -> Result<AnalysisReport, AnalysisError> {
    let Some(region) = selection::current_region(state).await else {
        info!("analysis: no region selected");
        state.notices.push(NoticeLevel::Warning, NO_REGION_MESSAGE, None);
        return Err(AnalysisError::NoRegion);
    };

    let Some(_in_flight) = InFlightGuard::acquire(&state.in_flight) else {
        info!("analysis: rejected, another run is pending");
        state.notices.push(NoticeLevel::Info, BUSY_MESSAGE, None);
        return Err(AnalysisError::Busy);
    };

    let run_id = Uuid::new_v4();
    let _loading = state.loading.begin();
    let sw = region.south_west();
    let ne = region.north_east();
    info!(%run_id, sw_lat = sw.lat, sw_lng = sw.lng, ne_lat = ne.lat, ne_lng = ne.lng, "analysis: started");

    let (dataset, provenance) = match fetch_timeline(state.source.as_ref(), region).await {
        Ok(dataset) => (dataset, DataProvenance::Live),
        Err(e) => {
            warn!(%run_id, error = %e, code = e.error_code(), retryable = e.retryable(), "analysis failed, using demo data");
            state
                .notices
                .push(NoticeLevel::Warning, FALLBACK_MESSAGE, Some(run_id));
            (fallback_dataset(), DataProvenance::Fallback { reason: e.to_string() })
        }
    };

    state.renderer.render(&dataset, &provenance);
    info!(%run_id, points = dataset.len(), fallback = provenance.is_fallback(), "analysis: rendered");

    Ok(AnalysisReport { run_id, region, provenance, dataset })
}

/// Query the source for `region` and parse the payload. No fallback here.
///
/// # Errors
///
/// Returns the source error or the parse error unchanged.
pub async fn fetch_timeline(source: &dyn VegetationSource, region: Region) -> Result<TimelineDataset, FallbackReason> {
    let query = AnalysisQuery::for_region(region);
    let payload = source.fetch(&query).await?;
    Ok(parse_timeline(&payload)?)
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
