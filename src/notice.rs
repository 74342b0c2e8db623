//! Auto-dismissing notices (toasts) for boundary outcomes.

use std::time::{Duration, Instant};

/// Default lifetime of a notice.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
    raised_at: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < self.ttl
    }
}

/// Queue of notices, newest last.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            notices: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, kind: NoticeKind, title: impl Into<String>, body: impl Into<String>, now: Instant) {
        self.notices.push(Notice {
            kind,
            title: title.into(),
            body: body.into(),
            raised_at: now,
            ttl: self.ttl,
        });
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.is_live(now))
    }

    /// Drops expired notices.
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|n| n.is_live(now));
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_expire() {
        let mut board = NoticeBoard::new(Duration::from_secs(4));
        let t0 = Instant::now();
        board.push(NoticeKind::Success, "Message sent!", "Thanks for reaching out.", t0);
        board.push(NoticeKind::Error, "Failed", "Try later", t0 + Duration::from_secs(2));

        assert_eq!(board.visible(t0 + Duration::from_secs(3)).count(), 2);
        assert_eq!(board.visible(t0 + Duration::from_secs(5)).count(), 1);

        board.prune(t0 + Duration::from_secs(7));
        assert!(board.is_empty());
    }

    #[test]
    fn test_dismiss_out_of_range_is_noop() {
        let mut board = NoticeBoard::default();
        board.dismiss(3);
        board.push(NoticeKind::Info, "a", "b", Instant::now());
        board.dismiss(0);
        assert!(board.is_empty());
    }
}
