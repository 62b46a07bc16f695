//! Sync CLI commands: manual push, session-start reconcile, and session
//! management (create / join / leave), plus the outcome journal.

use chrono::{Local, TimeZone};
use clap::{Args, Subcommand};

use super::engine_for;
use crate::config::Config;
use crate::state::AppState;
use crate::store::LocalStore;
use crate::sync::{normalize_sync_key, CloudClient, SyncEngine, SyncStatus};

/// Sync with the cloud session
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    pub command: Option<SyncSubcommand>,
}

#[derive(Subcommand)]
pub enum SyncSubcommand {
    /// Show sync session and status
    Status,

    /// Pull remote state and reconcile it with local data
    Pull,

    /// Create a new cloud session seeded with local data
    Create,

    /// Join an existing session by key
    Join {
        /// Session key (or a pasted session URL)
        key: String,
    },

    /// Leave the sync session (local data is kept)
    Leave,

    /// Show this session's sync journal
    Log {
        /// Clear the journal and dismiss the last error
        #[arg(long)]
        clear: bool,
    },
}

impl SyncCommand {
    pub async fn run(
        &self,
        store: &LocalStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut state = AppState::load(store);
        let mut engine = engine_for(config);

        match &self.command {
            // Manual sync: immediate push, bypassing the debounce.
            None => {
                engine.sync_now(&state).await;
                report(&engine);
            }
            Some(SyncSubcommand::Status) => {
                self.status(store, config, &mut engine, &mut state).await;
            }
            Some(SyncSubcommand::Pull) => {
                engine.start_session(&mut state).await;
                state.persist(store);
                report(&engine);
            }
            Some(SyncSubcommand::Create) => {
                if let Some(key) = &state.session.remote_key {
                    println!("Already in session {}. Leave it first.", key);
                    return Ok(());
                }
                if let Some(key) = engine.create_session(&mut state).await {
                    store.save_session_key(&key)?;
                    println!("Created sync session.");
                    println!();
                    println!("  Session key: {}", key);
                    println!();
                    println!("Enter this key on another device to share your data.");
                } else {
                    report(&engine);
                }
            }
            Some(SyncSubcommand::Join { key }) => {
                let Some(key) = normalize_sync_key(key) else {
                    return Err("Session key must be at least 4 characters".into());
                };
                engine.join_session(&mut state, key.clone()).await;
                store.save_session_key(&key)?;
                state.persist(store);
                report(&engine);
            }
            Some(SyncSubcommand::Leave) => {
                engine.leave_session(&mut state);
                store.clear_session_key()?;
                println!("Left the sync session. Local data is untouched.");
            }
            Some(SyncSubcommand::Log { clear }) => {
                if *clear {
                    engine.clear_log();
                    println!("Sync log cleared.");
                    return Ok(());
                }
                // The journal lives in memory only, so show the entries
                // produced by reconciling in this invocation.
                engine.start_session(&mut state).await;
                state.persist(store);
                print_log(&engine);
            }
        }

        Ok(())
    }

    async fn status(
        &self,
        store: &LocalStore,
        config: &Config,
        engine: &mut SyncEngine<CloudClient>,
        state: &mut AppState,
    ) {
        println!("Sync Status");
        println!("===========");
        println!();

        let Some(key) = state.session.remote_key.clone() else {
            println!("Status: idle (no session)");
            println!();
            println!("To enable cloud sync:");
            println!("  hydrotrack sync create        start a new session");
            println!("  hydrotrack sync join <KEY>    join an existing one");
            return;
        };

        println!("Session:   {}", key);
        println!("Server:    {}", config.sync.server_url);
        println!(
            "Auto-push: {}",
            if config.sync.auto_push {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!();

        engine.start_session(state).await;
        state.persist(store);

        match engine.status() {
            SyncStatus::Synced => println!("Status: ✓ synced"),
            SyncStatus::Error => {
                println!("Status: ✗ error");
                if let Some(message) = engine.last_error() {
                    println!("  {}", message);
                }
            }
            status => println!("Status: {}", status),
        }
    }
}

fn report(engine: &SyncEngine<CloudClient>) {
    match engine.status() {
        SyncStatus::Error => {
            if let Some(message) = engine.last_error() {
                eprintln!("✗ {}", message);
            }
        }
        SyncStatus::Idle => {
            if let Some(entry) = engine.log().entries().first() {
                println!("{}", entry.message);
            }
        }
        _ => {
            if let Some(entry) = engine.log().entries().first() {
                println!("✓ {}", entry.message);
            }
        }
    }
}

fn print_log(engine: &SyncEngine<CloudClient>) {
    println!("Sync Log");
    println!("========");
    println!();

    let entries = engine.log().entries();
    if entries.is_empty() {
        println!("No sync activity this session.");
        return;
    }

    for entry in entries {
        let when = Local
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map_or_else(
                || entry.timestamp.to_string(),
                |dt| dt.format("%H:%M:%S").to_string(),
            );
        println!("  {}  [{}]  {}", when, entry.status, entry.message);
    }

    if let Some(message) = engine.last_error() {
        println!();
        println!("Last error: {}", message);
    }
}
