//! Timeline rendering.
//!
//! DESIGN
//! ======
//! The analysis service hands each finished dataset to a `TimelineRenderer`
//! and expects nothing back. `PlotlyRenderer` turns it into a Plotly figure
//! document and keeps the latest one for the page to fetch; tests swap in a
//! recording renderer.

pub mod plotly;

use crate::timeline::{DataProvenance, TimelineDataset};

pub use plotly::{PlotlyRenderer, RenderedTimeline};

/// Sink for finished timelines. Rendering is a side effect only.
pub trait TimelineRenderer: Send + Sync {
    fn render(&self, dataset: &TimelineDataset, provenance: &DataProvenance);
}
