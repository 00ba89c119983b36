//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! passed explicitly to the analysis service. It owns the single current
//! selection, the loading indicator, the in-progress flag that rejects
//! overlapping runs, the notice board and the two collaborators (data
//! source and renderer).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::earthengine::VegetationSource;
use crate::geo::Region;
use crate::render::{PlotlyRenderer, TimelineRenderer};
use crate::services::loading::LoadingIndicator;
use crate::services::notice::NoticeBoard;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Current drawn region. Replaced on every draw.
    pub selection: Arc<RwLock<Option<Region>>>,
    pub loading: LoadingIndicator,
    /// Set while an analysis run is pending.
    pub in_flight: Arc<AtomicBool>,
    pub notices: NoticeBoard,
    pub source: Arc<dyn VegetationSource>,
    pub renderer: Arc<dyn TimelineRenderer>,
    /// Figure store served at `/api/timeline`. Production wires `renderer`
    /// to this same instance.
    pub timeline: Arc<PlotlyRenderer>,
}

impl AppState {
    #[must_use]
    pub fn new(source: Arc<dyn VegetationSource>, notices: NoticeBoard) -> Self {
        let timeline = Arc::new(PlotlyRenderer::new());
        let renderer: Arc<dyn TimelineRenderer> = timeline.clone();
        Self {
            selection: Arc::new(RwLock::new(None)),
            loading: LoadingIndicator::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
            notices,
            source,
            renderer,
            timeline,
        }
    }

    /// Replace the renderer (the figure store keeps its own instance).
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn TimelineRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn analysis_in_progress(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::earthengine::UnconfiguredSource;

    fn state() -> AppState {
        AppState::new(Arc::new(UnconfiguredSource::missing_key("EE_API_KEY_ENV")), NoticeBoard::default())
    }

    #[tokio::test]
    async fn new_state_has_no_selection() {
        let state = state();
        assert!(state.selection.read().await.is_none());
        assert!(!state.loading.is_visible());
        assert!(!state.analysis_in_progress());
    }

    #[test]
    fn default_renderer_feeds_timeline_store() {
        let state = state();
        state
            .renderer
            .render(&crate::timeline::fallback_dataset(), &crate::timeline::DataProvenance::Live);
        assert!(state.timeline.latest().is_some());
    }

    #[test]
    fn clones_share_in_flight_flag() {
        let state = state();
        let other = state.clone();
        other.in_flight.store(true, Ordering::SeqCst);
        assert!(state.analysis_in_progress());
    }
}
