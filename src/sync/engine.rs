//! Sync reconciliation engine.
//!
//! Decides, at session start and after every local mutation, whether to
//! pull remote state, push local state, or do neither; resolves conflicts
//! between local and remote snapshots; debounces outgoing pushes; and
//! keeps a bounded journal of outcomes.
//!
//! Single logical thread of control: at most one pull and one push are
//! logically in flight, enforced by the debounce/replace discipline rather
//! than locks. An in-flight HTTP call is never cancelled; a late result
//! may overwrite a newer status transition, which is acceptable because
//! status and log entries are diagnostic, not user content.

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::client::RemoteStore;
use super::error::SyncError;
use super::log::{LogStatus, SyncLog};
use crate::models::{SyncSnapshot, TrackerState};
use crate::state::AppState;

/// Quiet period before a scheduled push fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2500);

/// How recent a remote `updatedAt` must be for the remote copy to win the
/// conflict heuristic.
pub const FRESH_REMOTE_WINDOW_MS: i64 = 5 * 60 * 1000;

/// User-visible sync state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No remote key configured, or no sync activity pending.
    Idle,
    /// An exchange is in flight or scheduled.
    Syncing,
    /// The last exchange succeeded.
    Synced,
    /// The last exchange failed; the message stays surfaced until cleared
    /// or superseded by a success.
    Error,
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Idle => write!(f, "idle"),
            SyncStatus::Syncing => write!(f, "syncing"),
            SyncStatus::Synced => write!(f, "synced"),
            SyncStatus::Error => write!(f, "error"),
        }
    }
}

/// The reconciliation state machine.
///
/// Owns only the journal and the debounce deadline; tracker state and the
/// session key are owned by the caller and passed in by reference.
pub struct SyncEngine<R> {
    remote: R,
    debounce: Duration,
    status: SyncStatus,
    log: SyncLog,
    pending_push: Option<Instant>,
}

impl<R: RemoteStore> SyncEngine<R> {
    pub fn new(remote: R, debounce: Duration) -> Self {
        Self {
            remote,
            debounce,
            status: SyncStatus::Idle,
            log: SyncLog::new(),
            pending_push: None,
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn log(&self) -> &SyncLog {
        &self.log
    }

    pub fn last_error(&self) -> Option<&str> {
        self.log.last_error()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn has_pending_push(&self) -> bool {
        self.pending_push.is_some()
    }

    /// Session start: pulls the configured session and reconciles.
    ///
    /// A failed pull never clears or corrupts local data.
    pub async fn start_session(&mut self, state: &mut AppState) {
        let Some(key) = state.session.remote_key.clone() else {
            self.status = SyncStatus::Idle;
            return;
        };

        self.status = SyncStatus::Syncing;
        self.log
            .record(LogStatus::Info, format!("Syncing with session {}", key));

        match self.remote.pull(&key).await {
            Ok(snapshot) => {
                let now = Utc::now().timestamp_millis();
                if should_adopt_remote(&state.tracker, &snapshot, now) {
                    let pulled = snapshot.drinks.len();
                    state.adopt_snapshot(snapshot);
                    self.finish_success(format!("Pulled {} events from cloud", pulled));
                } else {
                    self.finish_success("Kept local data; remote copy is stale");
                }
            }
            Err(SyncError::NotFound) => {
                // Remote not initialized yet; seed it from local state.
                self.log
                    .record(LogStatus::Info, "Remote empty, seeding from local state");
                self.push_state(&key, state).await;
            }
            Err(e) => self.finish_error(e),
        }
    }

    /// A local mutation happened: schedule a trailing-edge debounced push.
    ///
    /// Any previously scheduled push is replaced outright. The status
    /// flips to `syncing` immediately so the user sees a sync is pending.
    pub fn note_mutation(&mut self, state: &AppState) {
        if state.session.remote_key.is_none() {
            return;
        }
        self.pending_push = Some(Instant::now() + self.debounce);
        self.status = SyncStatus::Syncing;
    }

    /// Drives the scheduled push, waiting out the quiet period.
    ///
    /// If the deadline moves while sleeping, the superseded wakeup is
    /// discarded and the wait restarts against the new deadline.
    pub async fn flush(&mut self, state: &AppState) {
        loop {
            let Some(deadline) = self.pending_push else {
                return;
            };
            tokio::time::sleep_until(deadline).await;
            if self.pending_push != Some(deadline) {
                continue;
            }
            self.pending_push = None;

            let Some(key) = state.session.remote_key.clone() else {
                return;
            };
            self.push_state(&key, state).await;
            return;
        }
    }

    /// Manual sync: cancels any pending debounce and pushes immediately.
    pub async fn sync_now(&mut self, state: &AppState) {
        self.pending_push = None;

        let Some(key) = state.session.remote_key.clone() else {
            self.status = SyncStatus::Idle;
            self.log
                .record(LogStatus::Info, "Sync requested without an active session");
            return;
        };
        self.push_state(&key, state).await;
    }

    /// Joins an existing session under `key`.
    ///
    /// A successful pull adopts the remote snapshot wholesale, no merge.
    /// Any pull failure is treated as claiming a fresh slot: local state
    /// is pushed under the new key.
    pub async fn join_session(&mut self, state: &mut AppState, key: String) {
        self.pending_push = None;
        state.session.remote_key = Some(key.clone());
        self.status = SyncStatus::Syncing;
        self.log
            .record(LogStatus::Info, format!("Joining session {}", key));

        match self.remote.pull(&key).await {
            Ok(snapshot) => {
                let pulled = snapshot.drinks.len();
                state.adopt_snapshot(snapshot);
                self.finish_success(format!("Adopted remote state ({} events)", pulled));
            }
            Err(_) => {
                self.push_state(&key, state).await;
            }
        }
    }

    /// Creates a new remote session seeded with current local state.
    ///
    /// Returns the generated key on success; on failure the engine has
    /// already transitioned to `error` and journaled the reason.
    pub async fn create_session(&mut self, state: &mut AppState) -> Option<String> {
        self.pending_push = None;
        self.status = SyncStatus::Syncing;

        let snapshot = SyncSnapshot::from_state(&state.tracker);
        match self.remote.create(&snapshot).await {
            Ok(key) => {
                state.session.remote_key = Some(key.clone());
                self.finish_success(format!("Created sync session {}", key));
                Some(key)
            }
            Err(e) => {
                self.finish_error(e);
                None
            }
        }
    }

    /// Leaves the sync session. Local data is untouched.
    pub fn leave_session(&mut self, state: &mut AppState) {
        self.pending_push = None;
        state.session.remote_key = None;
        self.status = SyncStatus::Idle;
        self.log
            .record(LogStatus::Info, "Left sync session, local data kept");
    }

    async fn push_state(&mut self, key: &str, state: &AppState) {
        self.status = SyncStatus::Syncing;
        let snapshot = SyncSnapshot::from_state(&state.tracker);

        match self.remote.push(key, &snapshot).await {
            Ok(()) => {
                self.finish_success(format!("Pushed {} events to cloud", snapshot.drinks.len()));
            }
            // Local state is never rolled back because a push failed.
            Err(e) => self.finish_error(e),
        }
    }

    fn finish_success(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("sync: {}", message);
        self.status = SyncStatus::Synced;
        self.log.record(LogStatus::Success, message);
    }

    fn finish_error(&mut self, error: SyncError) {
        warn!("sync failed: {}", error);
        self.status = SyncStatus::Error;
        self.log.record(LogStatus::Error, error.to_string());
    }
}

/// Conflict resolution on pull: a heuristic, not a merge.
///
/// Remote wins when local has nothing to lose or the remote copy looks
/// fresh. Known limitation: when both sides have recent edits this can
/// silently discard newer local ones; kept as-is rather than special-cased
/// further.
fn should_adopt_remote(local: &TrackerState, remote: &SyncSnapshot, now_ms: i64) -> bool {
    local.events.is_empty() || now_ms - remote.updated_at < FRESH_REMOTE_WINDOW_MS
}
