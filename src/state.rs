//! Shared application state and its mutation API.
//!
//! All mutation goes through these methods rather than ad-hoc field
//! writes, so persistence and sync can hook in at one place.

use tracing::warn;

use crate::models::{DrinkEvent, SyncSnapshot, TrackerState};
use crate::store::LocalStore;

/// Cloud session membership. When `remote_key` is absent the app runs in
/// local-only mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSession {
    pub remote_key: Option<String>,
}

/// Top-level application state: the tracker data plus sync session.
///
/// Owned by the application process; the sync engine gets read/write
/// access but owns neither the state nor its storage.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tracker: TrackerState,
    pub session: SyncSession,
}

impl AppState {
    /// Loads persisted state; missing or corrupt values fall back to
    /// defaults and never fail the caller.
    pub fn load(store: &LocalStore) -> Self {
        Self {
            tracker: TrackerState::new(store.load_events(), store.load_target()),
            session: SyncSession {
                remote_key: store.load_session_key(),
            },
        }
    }

    /// Logs one glass of water at the current time.
    pub fn add_drink(&mut self) -> DrinkEvent {
        let event = DrinkEvent::now();
        self.tracker.append(event.clone());
        event
    }

    /// Undoes the most recent drink logged today, if any.
    pub fn undo_drink(&mut self) -> Option<DrinkEvent> {
        self.tracker.remove_most_recent_today()
    }

    pub fn set_target(&mut self, target: u32) {
        self.tracker.set_target(target);
    }

    /// Replaces local events and target with a pulled snapshot.
    pub fn adopt_snapshot(&mut self, snapshot: SyncSnapshot) {
        self.tracker.events = snapshot.drinks;
        self.tracker.daily_target = snapshot.target;
        self.tracker.updated_at = snapshot.updated_at;
    }

    /// Best-effort persistence: failures are reported but the app keeps
    /// operating on in-memory state for the rest of the session.
    pub fn persist(&self, store: &LocalStore) {
        if let Err(e) = store.save_events(&self.tracker.events) {
            warn!("failed to save drink events: {}", e);
            eprintln!("Warning: could not save drink events: {}", e);
        }
        if let Err(e) = store.save_target(self.tracker.daily_target) {
            warn!("failed to save daily target: {}", e);
            eprintln!("Warning: could not save daily target: {}", e);
        }
    }
}
