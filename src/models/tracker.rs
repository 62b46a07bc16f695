use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::drink::DrinkEvent;

/// Glasses per day when the user has not set a target.
pub const DEFAULT_DAILY_TARGET: u32 = 8;

/// The tracked hydration state: logged events plus the daily target.
///
/// `events` stays in insertion order. Creation always appends with the
/// current time, so insertion order and timestamp order coincide in
/// practice; removal rules trust insertion order for tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    pub events: Vec<DrinkEvent>,
    pub daily_target: u32,
    /// Milliseconds since the Unix epoch of the last local mutation.
    pub updated_at: i64,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_DAILY_TARGET)
    }
}

impl TrackerState {
    pub fn new(events: Vec<DrinkEvent>, daily_target: u32) -> Self {
        Self {
            events,
            daily_target,
            updated_at: Utc::now().timestamp_millis(),
        }
    }

    /// Appends one event to the end of the log.
    pub fn append(&mut self, event: DrinkEvent) {
        self.events.push(event);
        self.touch();
    }

    /// Removes the last-inserted event that occurred today, if any.
    ///
    /// This is a last-in-today rule, not a last-by-timestamp rule: among
    /// today's events the one with the greatest insertion index is removed.
    /// A no-op when nothing was logged today.
    pub fn remove_most_recent_today(&mut self) -> Option<DrinkEvent> {
        self.remove_most_recent_since(start_of_local_day(Local::now()))
    }

    fn remove_most_recent_since(&mut self, day_start: i64) -> Option<DrinkEvent> {
        let index = self
            .events
            .iter()
            .rposition(|event| event.timestamp >= day_start)?;
        let removed = self.events.remove(index);
        self.touch();
        Some(removed)
    }

    /// Replaces the daily target. Callers guarantee `target >= 1`; the
    /// store does not clamp.
    pub fn set_target(&mut self, target: u32) {
        self.daily_target = target;
        self.touch();
    }

    /// Number of glasses logged today.
    pub fn today_count(&self) -> usize {
        let day_start = start_of_local_day(Local::now());
        self.events
            .iter()
            .filter(|event| event.timestamp >= day_start)
            .count()
    }

    /// Total glasses ever logged.
    pub fn total_count(&self) -> usize {
        self.events.len()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp_millis();
    }
}

/// Midnight of the given instant's local day, as epoch milliseconds.
pub fn start_of_local_day(now: DateTime<Local>) -> i64 {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    now.timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| now.timestamp_millis(), |start| start.timestamp_millis())
}
