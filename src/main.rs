use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hydrotrack::commands::{
    self, ConfigCommand, DataCommand, DrinkCommand, HistoryCommand, SyncCommand, TargetCommand,
};
use hydrotrack::config::Config;
use hydrotrack::models::View;
use hydrotrack::state::AppState;
use hydrotrack::store::LocalStore;

#[derive(Parser)]
#[command(name = "hydrotrack")]
#[command(version)]
#[command(about = "A hydration tracking CLI with optional cloud sync", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log and review drinks
    Drink(DrinkCommand),

    /// Show the daily history report
    History(HistoryCommand),

    /// Manage the daily target
    Target(TargetCommand),

    /// Cloud sync session and status
    Sync(SyncCommand),

    /// Manage locally stored data
    Data(DataCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HYDROTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    let store = LocalStore::new(config.data_dir.clone());

    match cli.command {
        Some(Commands::Drink(cmd)) => cmd.run(&store, &config).await?,
        Some(Commands::History(cmd)) => cmd.run(&store)?,
        Some(Commands::Target(cmd)) => cmd.run(&store, &config).await?,
        Some(Commands::Sync(cmd)) => cmd.run(&store, &config).await?,
        Some(Commands::Data(cmd)) => cmd.run(&store)?,
        Some(Commands::Config(cmd)) => cmd.run(&store, &config)?,
        None => {
            // Reopen on the last rendered view.
            let state = AppState::load(&store);
            match store.load_view() {
                View::Home => commands::print_home(&state),
                View::History => commands::print_report(&state, 30),
                View::Settings => commands::print_config(&config),
            }
        }
    }

    Ok(())
}
