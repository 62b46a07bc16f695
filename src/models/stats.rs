use chrono::{Days, Local, NaiveDate, NaiveTime, TimeZone};

use super::drink::DrinkEvent;

const DAY_MILLIS: i64 = 86_400_000;

/// Per-day summary for the history view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub count: usize,
    pub met_target: bool,
}

/// Aggregates events into one stat per day for the trailing window ending
/// today (oldest first), mirroring the 30-day history report.
pub fn daily_stats(events: &[DrinkEvent], target: u32, days: u32) -> Vec<DailyStat> {
    daily_stats_ending(events, target, days, Local::now().date_naive())
}

fn daily_stats_ending(
    events: &[DrinkEvent],
    target: u32,
    days: u32,
    last_day: NaiveDate,
) -> Vec<DailyStat> {
    let mut stats = Vec::with_capacity(days as usize);
    for offset in (0..u64::from(days)).rev() {
        let Some(date) = last_day.checked_sub_days(Days::new(offset)) else {
            continue;
        };
        let day_start = local_midnight_millis(date);
        let day_end = day_start + DAY_MILLIS;

        let count = events
            .iter()
            .filter(|event| event.timestamp >= day_start && event.timestamp < day_end)
            .count();

        stats.push(DailyStat {
            date,
            count,
            met_target: count >= target as usize,
        });
    }
    stats
}

fn local_midnight_millis(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map_or(0, |start| start.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_on(date: NaiveDate, hour_offset_ms: i64) -> DrinkEvent {
        DrinkEvent::at(local_midnight_millis(date) + hour_offset_ms)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_length_and_order() {
        let stats = daily_stats_ending(&[], 8, 30, day(2025, 6, 30));
        assert_eq!(stats.len(), 30);
        assert_eq!(stats[0].date, day(2025, 6, 1));
        assert_eq!(stats[29].date, day(2025, 6, 30));
    }

    #[test]
    fn test_events_grouped_by_day() {
        let monday = day(2025, 6, 2);
        let tuesday = day(2025, 6, 3);
        let events = vec![
            event_on(monday, 1_000),
            event_on(monday, 2_000),
            event_on(tuesday, 500),
        ];

        let stats = daily_stats_ending(&events, 2, 2, tuesday);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].count, 1);
    }

    #[test]
    fn test_met_target_boundary() {
        let today = day(2025, 6, 10);
        let events = vec![event_on(today, 100), event_on(today, 200)];

        let stats = daily_stats_ending(&events, 2, 1, today);
        assert!(stats[0].met_target);

        let stats = daily_stats_ending(&events, 3, 1, today);
        assert!(!stats[0].met_target);
    }

    #[test]
    fn test_events_outside_window_ignored() {
        let today = day(2025, 6, 10);
        let last_week = day(2025, 6, 1);
        let events = vec![event_on(last_week, 100)];

        let stats = daily_stats_ending(&events, 1, 3, today);
        assert!(stats.iter().all(|s| s.count == 0));
    }

    #[test]
    fn test_event_at_next_midnight_belongs_to_next_day() {
        let today = day(2025, 6, 10);
        let events = vec![event_on(today, DAY_MILLIS)];

        let stats = daily_stats_ending(&events, 1, 1, today);
        assert_eq!(stats[0].count, 0);
    }
}
