use clap::{Args, Subcommand};

use super::push_after_mutation;
use crate::config::Config;
use crate::state::AppState;
use crate::store::LocalStore;

#[derive(Args)]
pub struct TargetCommand {
    #[command(subcommand)]
    pub command: TargetSubcommand,
}

#[derive(Subcommand)]
pub enum TargetSubcommand {
    /// Show the current daily target
    Show,

    /// Set the daily target (glasses per day, minimum 1)
    Set {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        target: u32,
    },
}

impl TargetCommand {
    pub async fn run(
        &self,
        store: &LocalStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut state = AppState::load(store);

        match &self.command {
            TargetSubcommand::Show => {
                println!("Daily target: {} glasses", state.tracker.daily_target);
            }
            TargetSubcommand::Set { target } => {
                state.set_target(*target);
                state.persist(store);
                println!("Daily target set to {} glasses.", target);

                push_after_mutation(config, &state).await;
            }
        }

        Ok(())
    }
}
