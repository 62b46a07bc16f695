use clap::{Args, Subcommand};
use std::io::{self, BufRead, Write};

use crate::store::LocalStore;

#[derive(Args)]
pub struct DataCommand {
    #[command(subcommand)]
    pub command: DataSubcommand,
}

#[derive(Subcommand)]
pub enum DataSubcommand {
    /// Delete all local data, including the sync session key
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl DataCommand {
    pub fn run(&self, store: &LocalStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DataSubcommand::Clear { yes } => {
                if !yes && !confirm()? {
                    println!("Aborted.");
                    return Ok(());
                }

                store.clear_all()?;
                println!("All local data removed. Cloud sync is disabled.");
                Ok(())
            }
        }
    }
}

fn confirm() -> Result<bool, io::Error> {
    print!("This deletes local progress AND disables cloud sync. Type 'yes' to confirm: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
