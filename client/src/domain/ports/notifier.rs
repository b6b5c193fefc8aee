//! Driven port for surfacing notices to the user.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::Notice;

/// Port for delivering a [`Notice`] to whatever presents it.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Present `notice`; delivery is best effort.
    fn notify(&self, notice: &Notice);
}

/// Notifier double that keeps every notice it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Notifier with no notices yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice received, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
