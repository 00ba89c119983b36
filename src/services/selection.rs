//! Region selection — at most one live region, replaced on every draw.

use tracing::info;

use crate::geo::Region;
use crate::state::AppState;

/// Make `region` the current selection, returning the one it replaced.
pub async fn select_region(state: &AppState, region: Region) -> Option<Region> {
    let previous = state.selection.write().await.replace(region);
    let sw = region.south_west();
    let ne = region.north_east();
    info!(sw_lat = sw.lat, sw_lng = sw.lng, ne_lat = ne.lat, ne_lng = ne.lng, replaced = previous.is_some(), "region selected");
    previous
}

/// Drop the current selection, returning it.
pub async fn clear_region(state: &AppState) -> Option<Region> {
    let previous = state.selection.write().await.take();
    if previous.is_some() {
        info!("region cleared");
    }
    previous
}

/// Snapshot of the current selection. The lock is released before returning
/// so an analysis run never holds it across the network call.
pub async fn current_region(state: &AppState) -> Option<Region> {
    *state.selection.read().await
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
