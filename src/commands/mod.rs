mod config_cmd;
mod data;
mod drink;
mod history;
mod sync_cmd;
mod target;

use clap::ValueEnum;
use std::time::Duration;

pub use config_cmd::{ConfigCommand, ConfigSubcommand};
pub use data::{DataCommand, DataSubcommand};
pub use drink::{DrinkCommand, DrinkSubcommand};
pub use history::HistoryCommand;
pub use sync_cmd::{SyncCommand, SyncSubcommand};
pub use target::{TargetCommand, TargetSubcommand};

pub use config_cmd::print_config;
pub use drink::print_home;
pub use history::print_report;

use crate::config::Config;
use crate::state::AppState;
use crate::store::LocalStore;
use crate::sync::{CloudClient, SyncEngine, SyncStatus};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Builds a reconciliation engine against the configured remote store.
fn engine_for(config: &Config) -> SyncEngine<CloudClient> {
    SyncEngine::new(
        CloudClient::new(config.sync.server_url.clone()),
        Duration::from_millis(config.sync.debounce_ms),
    )
}

/// Pushes local state to the cloud after a mutation, if a session is
/// active and auto-push is enabled.
///
/// Failures never block local tracking: they are reported on stderr and
/// the command still succeeds.
async fn push_after_mutation(config: &Config, state: &AppState) {
    if !config.sync.auto_push || state.session.remote_key.is_none() {
        return;
    }

    let mut engine = engine_for(config);
    engine.note_mutation(state);
    engine.flush(state).await;

    if engine.status() == SyncStatus::Error {
        if let Some(message) = engine.last_error() {
            eprintln!("Cloud sync failed: {}", message);
        }
    }
}

/// Remembers the last rendered view; persistence failures only warn.
fn remember_view(store: &LocalStore, view: crate::models::View) {
    if let Err(e) = store.save_view(view) {
        tracing::warn!("could not persist view: {}", e);
    }
}
