use chrono::{Local, TimeZone};
use clap::Args;

use super::{remember_view, OutputFormat};
use crate::models::{daily_stats, View};
use crate::state::AppState;
use crate::store::LocalStore;

const RECENT_LOG_LIMIT: usize = 5;

/// Show the daily history report
#[derive(Args)]
pub struct HistoryCommand {
    /// Number of trailing days to report
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl HistoryCommand {
    pub fn run(&self, store: &LocalStore) -> Result<(), Box<dyn std::error::Error>> {
        remember_view(store, View::History);
        let state = AppState::load(store);

        match self.format {
            OutputFormat::Json => {
                let stats = daily_stats(
                    &state.tracker.events,
                    state.tracker.daily_target,
                    self.days,
                );
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => print_report(&state, self.days),
        }

        Ok(())
    }
}

/// Renders the text history report.
pub fn print_report(state: &AppState, days: u32) {
    let stats = daily_stats(&state.tracker.events, state.tracker.daily_target, days);
    let days_met = stats.iter().filter(|s| s.met_target).count();

    println!("History Report");
    println!("==============");
    println!();
    println!("Days goal met: {}", days_met);
    println!("Total glasses: {}", state.tracker.total_count());
    println!();
    println!("Last {} days:", days);

    for stat in &stats {
        let marker = if stat.met_target { " ✓" } else { "" };
        println!(
            "  {}  {:>3}  {}{}",
            stat.date.format("%b %d"),
            stat.count,
            "█".repeat(stat.count.min(40)),
            marker
        );
    }

    let recent: Vec<_> = state
        .tracker
        .events
        .iter()
        .rev()
        .take(RECENT_LOG_LIMIT)
        .collect();
    if !recent.is_empty() {
        println!();
        println!("Recent logs:");
        for event in recent {
            let when = Local
                .timestamp_millis_opt(event.timestamp)
                .single()
                .map_or_else(
                    || event.timestamp.to_string(),
                    |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
                );
            println!("  {}  +{}", when, event.amount);
        }
    }
}
