//! Notifier adapter that records notices as structured log events.

use tracing::{info, warn};

use crate::domain::ports::Notifier;
use crate::domain::{Notice, NoticeLevel};

/// Routes notices to `tracing`; used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.message, "notice"),
            NoticeLevel::Error => warn!(notice = %notice.message, "notice"),
        }
    }
}
