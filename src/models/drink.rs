use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged glass of water.
///
/// Events are immutable once created: they are only ever appended with the
/// current time, and removed via an explicit undo of the most recent
/// same-day event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkEvent {
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Glasses recorded by this event (always 1 in practice).
    pub amount: u32,
}

impl DrinkEvent {
    /// Creates an event stamped with the current time.
    pub fn now() -> Self {
        Self::at(Utc::now().timestamp_millis())
    }

    /// Creates an event at an explicit timestamp.
    pub fn at(timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            amount: 1,
        }
    }
}
