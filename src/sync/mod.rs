//! Cloud synchronization: remote client, reconciliation engine, and the
//! bounded outcome journal.
//!
//! Local state is authoritative; the remote store holds whole-snapshot
//! copies keyed by an opaque session key. Reconciliation is a heuristic
//! (last-writer / larger-dataset), not a CRDT merge.

pub mod client;
pub mod engine;
pub mod error;
pub mod log;

pub use client::{
    generate_sync_key, normalize_sync_key, CloudClient, RemoteStore, DEFAULT_SERVER_URL,
};
pub use engine::{SyncEngine, SyncStatus, DEFAULT_DEBOUNCE, FRESH_REMOTE_WINDOW_MS};
pub use error::SyncError;
pub use log::{LogStatus, SyncLog, SyncLogEntry, SYNC_LOG_CAPACITY};
