//! Transient status notices
//!
//! Every rejection, error, and check notification goes through one channel:
//! a notice that displays for two seconds and dismisses itself. Check
//! notifications use the success tone even though they ride the same feed.

use std::time::Duration;
use tokio::time::Instant;

/// How long a notice stays visible
pub const STATUS_VISIBLE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusNotice {
    pub message: String,
    pub tone: StatusTone,
    expires_at: Instant,
}

/// Feed of auto-dismissing notices
#[derive(Debug, Default)]
pub struct StatusFeed {
    notices: Vec<StatusNotice>,
}

impl StatusFeed {
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), StatusTone::Error);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message.into(), StatusTone::Success);
    }

    fn push(&mut self, message: String, tone: StatusTone) {
        self.notices.push(StatusNotice {
            message,
            tone,
            expires_at: Instant::now() + STATUS_VISIBLE,
        });
    }

    /// Drop notices whose display window has passed
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|notice| now < notice.expires_at);
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &StatusNotice> {
        self.notices.iter().filter(move |notice| now < notice.expires_at)
    }

    /// Most recent notice, expired or not; handy for tests and the driver
    pub fn latest(&self) -> Option<&StatusNotice> {
        self.notices.last()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
