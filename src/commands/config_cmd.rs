use clap::{Args, Subcommand};

use super::{remember_view, OutputFormat};
use crate::config::Config;
use crate::models::View;
use crate::store::LocalStore;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(
        &self,
        store: &LocalStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                remember_view(store, View::Settings);
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => print_config(config),
                }
            }
        }

        Ok(())
    }
}

/// Renders the settings view.
pub fn print_config(config: &Config) {
    println!("Configuration");
    println!("=============");
    println!();

    if let Some(path) = &config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!(
            "Config file: {} (not found)",
            Config::default_config_path().display()
        );
    }
    println!("Data dir:    {}", config.data_dir.display());
    println!();
    println!("Sync server: {}", config.sync.server_url);
    println!(
        "Auto-push:   {}",
        if config.sync.auto_push {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Debounce:    {} ms", config.sync.debounce_ms);
}
