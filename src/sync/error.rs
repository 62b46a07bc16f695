//! Sync error types.

use thiserror::Error;

/// Failures from remote store operations.
///
/// Every remote failure is converted to one of these variants at the client
/// boundary so the reconciliation engine can branch with an exhaustive
/// match instead of a surrounding recovery block. `NotFound` is kept
/// distinct because it is not a user-facing failure: it means the remote
/// slot has no data yet and triggers auto-initialization via push.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote key has no data yet.
    #[error("No data found for this sync key")]
    NotFound,
    /// Request could not complete.
    #[error("Network error: {0}")]
    Network(String),
    /// Server responded with a non-success status.
    #[error("Server returned status {0}")]
    Server(u16),
    /// Response parsed but failed shape validation.
    #[error("Malformed remote data: {0}")]
    MalformedData(String),
}
