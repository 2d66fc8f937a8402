//! Transient user notices and the auto-save indicator

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// How long a notice stays up
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

const SAVED_SHOWN_AFTER: Duration = Duration::from_millis(500);
const SAVED_HIDDEN_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub created: Instant,
}

/// Queue of notices, each dismissed after [`NOTICE_TTL`] or on click
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
            created: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop expired notices
    pub fn expire(&mut self, now: Instant) {
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < NOTICE_TTL);
    }

    pub fn active(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return everything queued (for one-shot front-ends)
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Hidden,
    Saving,
    Saved,
    Failed,
}

/// Auto-save indicator: saving, then saved after 500 ms, hidden after 2 s more.
/// A failure stays up until the next save.
#[derive(Debug, Clone, Default)]
pub struct SaveIndicator {
    started: Option<Instant>,
    failed: bool,
    last_saved: Option<DateTime<Local>>,
}

impl SaveIndicator {
    pub fn saved(&mut self, now: Instant) {
        self.started = Some(now);
        self.failed = false;
        self.last_saved = Some(Local::now());
    }

    pub fn failed(&mut self) {
        self.started = None;
        self.failed = true;
    }

    pub fn status(&self, now: Instant) -> SaveStatus {
        if self.failed {
            return SaveStatus::Failed;
        }
        match self.started {
            None => SaveStatus::Hidden,
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                if elapsed < SAVED_SHOWN_AFTER {
                    SaveStatus::Saving
                } else if elapsed < SAVED_SHOWN_AFTER + SAVED_HIDDEN_AFTER {
                    SaveStatus::Saved
                } else {
                    SaveStatus::Hidden
                }
            }
        }
    }

    pub fn label(&self, now: Instant) -> Option<&'static str> {
        match self.status(now) {
            SaveStatus::Hidden => None,
            SaveStatus::Saving => Some("Saving..."),
            SaveStatus::Saved => Some("Saved"),
            SaveStatus::Failed => Some("Save failed"),
        }
    }

    /// Wall-clock time of the last successful save
    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_expire_after_ttl() {
        let start = Instant::now();
        let mut board = NoticeBoard::default();
        board.push(NoticeKind::Info, "first", start);
        board.push(NoticeKind::Error, "second", start + Duration::from_secs(3));

        board.expire(start + Duration::from_secs(5));
        assert_eq!(board.active().len(), 1);
        assert_eq!(board.active()[0].message, "second");

        board.expire(start + Duration::from_secs(8));
        assert!(board.active().is_empty());
    }

    #[test]
    fn test_dismiss_by_id() {
        let now = Instant::now();
        let mut board = NoticeBoard::default();
        let a = board.push(NoticeKind::Info, "a", now);
        board.push(NoticeKind::Info, "b", now);
        board.dismiss(a);
        assert_eq!(board.drain().len(), 1);
        assert!(board.active().is_empty());
    }

    #[test]
    fn test_indicator_phases() {
        let start = Instant::now();
        let mut indicator = SaveIndicator::default();
        assert_eq!(indicator.status(start), SaveStatus::Hidden);

        indicator.saved(start);
        assert_eq!(indicator.status(start + Duration::from_millis(100)), SaveStatus::Saving);
        assert_eq!(indicator.status(start + Duration::from_millis(600)), SaveStatus::Saved);
        assert_eq!(indicator.status(start + Duration::from_secs(3)), SaveStatus::Hidden);
        assert!(indicator.last_saved().is_some());

        indicator.failed();
        assert_eq!(indicator.label(start + Duration::from_secs(60)), Some("Save failed"));
    }
}
