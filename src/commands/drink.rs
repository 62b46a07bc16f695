use clap::{Args, Subcommand};

use super::{push_after_mutation, remember_view};
use crate::config::Config;
use crate::models::View;
use crate::state::AppState;
use crate::store::LocalStore;

#[derive(Args)]
pub struct DrinkCommand {
    #[command(subcommand)]
    pub command: DrinkSubcommand,
}

#[derive(Subcommand)]
pub enum DrinkSubcommand {
    /// Log a glass of water
    Add,

    /// Undo the most recent glass logged today
    Undo,

    /// Show today's progress
    Today,
}

impl DrinkCommand {
    pub async fn run(
        &self,
        store: &LocalStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut state = AppState::load(store);

        match &self.command {
            DrinkSubcommand::Add => {
                state.add_drink();
                state.persist(store);

                let count = state.tracker.today_count();
                let target = state.tracker.daily_target;
                println!("Logged a glass of water ({}/{} today).", count, target);
                print_encouragement(count, target);

                push_after_mutation(config, &state).await;
            }
            DrinkSubcommand::Undo => match state.undo_drink() {
                Some(_) => {
                    state.persist(store);
                    println!(
                        "Removed the last glass ({}/{} today).",
                        state.tracker.today_count(),
                        state.tracker.daily_target
                    );
                    push_after_mutation(config, &state).await;
                }
                None => {
                    println!("Nothing logged today, nothing to undo.");
                }
            },
            DrinkSubcommand::Today => {
                remember_view(store, View::Home);
                print_home(&state);
            }
        }

        Ok(())
    }
}

/// Renders the home view: today's count against the target.
pub fn print_home(state: &AppState) {
    let count = state.tracker.today_count();
    let target = state.tracker.daily_target;
    let percentage = (count as f64 / target as f64 * 100.0).min(100.0);

    println!("HydroTrack");
    println!("==========");
    println!();
    println!("Today: {} / {} glasses ({:.0}%)", count, target, percentage);
    print_encouragement(count, target);
}

fn print_encouragement(count: usize, target: u32) {
    let remaining = (target as usize).saturating_sub(count);
    if remaining > 0 {
        println!(
            "{} more glass{} to reach your goal!",
            remaining,
            if remaining == 1 { "" } else { "es" }
        );
    } else {
        println!("Daily target reached! Great job!");
    }
}
