//! User-visible notices.
//!
//! Bounded FIFO of alert-style messages. The page polls `recent()`; when the
//! board is full the oldest notice is dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use uuid::Uuid;

pub const DEFAULT_NOTICE_CAPACITY: usize = 50;

pub const NO_REGION_MESSAGE: &str = "Please draw an area first";
pub const FALLBACK_MESSAGE: &str = "Analysis failed - using demo data";
pub const BUSY_MESSAGE: &str = "Analysis already in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    /// Analysis run that raised the notice, if any.
    pub run_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct NoticeBoard {
    inner: Arc<Mutex<VecDeque<Notice>>>,
    capacity: usize,
}

impl NoticeBoard {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))), capacity }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>, run_id: Option<Uuid>) -> Notice {
        let notice = Notice { id: Uuid::new_v4(), level, message: message.into(), run_id };
        let mut queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        while queue.len() >= self.capacity {
            queue.pop_front();
        }
        queue.push_back(notice.clone());
        notice
    }

    /// Oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<Notice> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_CAPACITY)
    }
}

#[cfg(test)]
#[path = "notice_test.rs"]
mod tests;
