//! Loading indicator with scoped show/hide.
//!
//! `begin()` shows the indicator and returns a guard; dropping the guard
//! hides it, so every exit path of an analysis run (including early `?`
//! returns and panics unwinding through the task) ends hidden.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Clone, Default)]
pub struct LoadingIndicator {
    visible: Arc<AtomicBool>,
    shows: Arc<AtomicU64>,
}

impl LoadingIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Number of hidden → visible transitions since creation.
    #[must_use]
    pub fn show_count(&self) -> u64 {
        self.shows.load(Ordering::SeqCst)
    }

    /// Show the indicator until the returned guard is dropped.
    #[must_use = "the indicator hides as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        self.show();
        LoadingGuard { indicator: self.clone() }
    }

    fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            self.shows.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Hide the indicator. No-op when already hidden.
    pub fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }
}

pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;
