//! Plotly figure builder for the dual-axis deforestation chart.

use std::sync::RwLock;

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::TimelineRenderer;
use crate::timeline::{DataProvenance, TimelineDataset};

const CHART_TITLE: &str = "Deforestation Timeline Analysis";
const NDVI_TRACE_NAME: &str = "Vegetation Index (NDVI)";
const NDVI_COLOR: &str = "#2ca02c";
const LOSS_TRACE_NAME: &str = "Forest Loss %";
const LOSS_COLOR: &str = "#d62728";

/// Latest chart handed to the page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedTimeline {
    /// Changes on every render so the page can skip redraws.
    pub revision: Uuid,
    pub provenance: DataProvenance,
    pub figure: Value,
}

/// Build the Plotly `{ data, layout }` document: NDVI on the left axis,
/// forest loss on an overlaid right axis, years shared on x.
#[must_use]
pub fn timeline_figure(dataset: &TimelineDataset) -> Value {
    json!({
        "data": [
            {
                "x": dataset.years(),
                "y": dataset.ndvi_values(),
                "name": NDVI_TRACE_NAME,
                "line": { "color": NDVI_COLOR }
            },
            {
                "x": dataset.years(),
                "y": dataset.forest_loss_percent(),
                "name": LOSS_TRACE_NAME,
                "yaxis": "y2",
                "line": { "color": LOSS_COLOR }
            }
        ],
        "layout": {
            "title": CHART_TITLE,
            "yaxis": { "title": "NDVI" },
            "yaxis2": {
                "title": "Forest Loss (%)",
                "overlaying": "y",
                "side": "right"
            }
        }
    })
}

/// Renderer that keeps the most recent figure in memory.
#[derive(Default)]
pub struct PlotlyRenderer {
    latest: RwLock<Option<RenderedTimeline>>,
}

impl PlotlyRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently rendered chart, if any analysis has completed.
    #[must_use]
    pub fn latest(&self) -> Option<RenderedTimeline> {
        self.latest
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl TimelineRenderer for PlotlyRenderer {
    fn render(&self, dataset: &TimelineDataset, provenance: &DataProvenance) {
        let rendered = RenderedTimeline {
            revision: Uuid::new_v4(),
            provenance: provenance.clone(),
            figure: timeline_figure(dataset),
        };
        tracing::debug!(points = dataset.len(), fallback = provenance.is_fallback(), "timeline rendered");
        *self
            .latest
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(rendered);
    }
}

#[cfg(test)]
#[path = "plotly_test.rs"]
mod tests;
