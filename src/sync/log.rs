//! Bounded in-memory journal of sync outcomes.

use chrono::Utc;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Maximum number of retained entries.
pub const SYNC_LOG_CAPACITY: usize = 10;

/// Outcome class of a logged sync event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Error,
    Info,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStatus::Success => write!(f, "success"),
            LogStatus::Error => write!(f, "error"),
            LogStatus::Info => write!(f, "info"),
        }
    }
}

/// One diagnostic journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct SyncLogEntry {
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub status: LogStatus,
    pub message: String,
}

/// Most-recent-first journal capped at [`SYNC_LOG_CAPACITY`] entries.
///
/// Purely diagnostic: never persisted across restarts. Error entries also
/// update a last-error field surfaced to the user until it is cleared or
/// superseded by a success.
#[derive(Debug, Default)]
pub struct SyncLog {
    entries: Vec<SyncLogEntry>,
    last_error: Option<String>,
}

impl SyncLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends an entry, dropping the oldest beyond capacity.
    pub fn record(&mut self, status: LogStatus, message: impl Into<String>) {
        let message = message.into();
        match status {
            LogStatus::Error => self.last_error = Some(message.clone()),
            LogStatus::Success => self.last_error = None,
            LogStatus::Info => {}
        }

        self.entries.insert(
            0,
            SyncLogEntry {
                id: Uuid::new_v4(),
                timestamp: Utc::now().timestamp_millis(),
                status,
                message,
            },
        );
        self.entries.truncate(SYNC_LOG_CAPACITY);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[SyncLogEntry] {
        &self.entries
    }

    /// Message of the most recent error, if not yet superseded or cleared.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Dismisses the surfaced error without touching the journal.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Empties the journal and the surfaced error.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_most_recent_first() {
        let mut log = SyncLog::new();
        log.record(LogStatus::Info, "first");
        log.record(LogStatus::Info, "second");

        assert_eq!(log.entries()[0].message, "second");
        assert_eq!(log.entries()[1].message, "first");
    }

    #[test]
    fn test_log_never_exceeds_capacity() {
        let mut log = SyncLog::new();
        for i in 0..25 {
            log.record(LogStatus::Info, format!("entry {}", i));
        }

        assert_eq!(log.entries().len(), SYNC_LOG_CAPACITY);
        // Newest retained, oldest dropped.
        assert_eq!(log.entries()[0].message, "entry 24");
        assert_eq!(log.entries()[9].message, "entry 15");
    }

    #[test]
    fn test_error_sets_last_error() {
        let mut log = SyncLog::new();
        log.record(LogStatus::Error, "push failed");
        assert_eq!(log.last_error(), Some("push failed"));
    }

    #[test]
    fn test_success_supersedes_last_error() {
        let mut log = SyncLog::new();
        log.record(LogStatus::Error, "push failed");
        log.record(LogStatus::Success, "pushed");
        assert_eq!(log.last_error(), None);
    }

    #[test]
    fn test_info_leaves_last_error_alone() {
        let mut log = SyncLog::new();
        log.record(LogStatus::Error, "push failed");
        log.record(LogStatus::Info, "session started");
        assert_eq!(log.last_error(), Some("push failed"));
    }

    #[test]
    fn test_clear_error_keeps_entries() {
        let mut log = SyncLog::new();
        log.record(LogStatus::Error, "boom");
        log.clear_error();

        assert_eq!(log.last_error(), None);
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut log = SyncLog::new();
        log.record(LogStatus::Error, "boom");
        log.clear();

        assert!(log.entries().is_empty());
        assert_eq!(log.last_error(), None);
    }
}
