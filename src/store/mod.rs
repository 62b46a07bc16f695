//! File-backed local persistence adapter.
//!
//! One file per persisted key under the data directory: `drinks.json`
//! (the event log), `target` (integer encoded as a string), `view` (last
//! rendered view), and `session` (remote session key). Loads are lenient:
//! missing or corrupt data falls back to a default and is reported via
//! `tracing`, never surfaced as an error to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::models::{DrinkEvent, View, DEFAULT_DAILY_TARGET};

const DRINKS_FILE: &str = "drinks.json";
const TARGET_FILE: &str = "target";
const VIEW_FILE: &str = "view";
const SESSION_FILE: &str = "session";

/// Durable key-value storage for tracker state.
#[derive(Debug, Clone)]
pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads the event log. Missing or corrupt data yields an empty log.
    pub fn load_events(&self) -> Vec<DrinkEvent> {
        let path = self.data_dir.join(DRINKS_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(events) => events,
                Err(e) => {
                    warn!("corrupt drink log at {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("could not read drink log at {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn save_events(&self, events: &[DrinkEvent]) -> Result<(), StoreError> {
        let contents = serde_json::to_string(events).map_err(StoreError::Encode)?;
        self.write_key(DRINKS_FILE, &contents)
    }

    /// Loads the daily target; default when missing or corrupt.
    pub fn load_target(&self) -> u32 {
        let path = self.data_dir.join(TARGET_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => match contents.trim().parse() {
                Ok(target) => target,
                Err(e) => {
                    warn!("corrupt target at {}: {}", path.display(), e);
                    DEFAULT_DAILY_TARGET
                }
            },
            Err(_) => DEFAULT_DAILY_TARGET,
        }
    }

    pub fn save_target(&self, target: u32) -> Result<(), StoreError> {
        self.write_key(TARGET_FILE, &target.to_string())
    }

    /// Loads the last rendered view; home when missing or corrupt.
    pub fn load_view(&self) -> View {
        match fs::read_to_string(self.data_dir.join(VIEW_FILE)) {
            Ok(contents) => View::from_str(&contents).unwrap_or_default(),
            Err(_) => View::default(),
        }
    }

    pub fn save_view(&self, view: View) -> Result<(), StoreError> {
        self.write_key(VIEW_FILE, &view.to_string())
    }

    /// Loads the remote session key, if a sync session is active.
    pub fn load_session_key(&self) -> Option<String> {
        match fs::read_to_string(self.data_dir.join(SESSION_FILE)) {
            Ok(contents) => {
                let key = contents.trim().to_string();
                if key.is_empty() {
                    None
                } else {
                    Some(key)
                }
            }
            Err(_) => None,
        }
    }

    pub fn save_session_key(&self, key: &str) -> Result<(), StoreError> {
        self.write_key(SESSION_FILE, key)
    }

    pub fn clear_session_key(&self) -> Result<(), StoreError> {
        self.remove_key(SESSION_FILE)
    }

    /// Wipes every persisted key, including the remote session key.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        for file in [DRINKS_FILE, TARGET_FILE, VIEW_FILE, SESSION_FILE] {
            self.remove_key(file)?;
        }
        Ok(())
    }

    fn write_key(&self, file: &str, contents: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::Io(self.data_dir.clone(), e))?;
        let path = self.data_dir.join(file);
        fs::write(&path, contents).map_err(|e| StoreError::Io(path, e))
    }

    fn remove_key(&self, file: &str) -> Result<(), StoreError> {
        let path = self.data_dir.join(file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(path, e)),
        }
    }
}

/// Errors from writing local storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, io::Error),
    #[error("Failed to encode data: {0}")]
    Encode(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_load_events_missing_returns_empty() {
        let (store, _temp) = test_store();
        assert!(store.load_events().is_empty());
    }

    #[test]
    fn test_save_and_load_events_roundtrip() {
        let (store, _temp) = test_store();
        let events = vec![DrinkEvent::at(100), DrinkEvent::at(200)];

        store.save_events(&events).unwrap();
        assert_eq!(store.load_events(), events);
    }

    #[test]
    fn test_load_events_corrupt_returns_empty() {
        let (store, temp) = test_store();
        fs::write(temp.path().join(DRINKS_FILE), "{not json").unwrap();
        assert!(store.load_events().is_empty());
    }

    #[test]
    fn test_target_default_when_missing() {
        let (store, _temp) = test_store();
        assert_eq!(store.load_target(), DEFAULT_DAILY_TARGET);
    }

    #[test]
    fn test_target_stored_as_string() {
        let (store, temp) = test_store();
        store.save_target(11).unwrap();

        let raw = fs::read_to_string(temp.path().join(TARGET_FILE)).unwrap();
        assert_eq!(raw, "11");
        assert_eq!(store.load_target(), 11);
    }

    #[test]
    fn test_target_corrupt_falls_back_to_default() {
        let (store, temp) = test_store();
        fs::write(temp.path().join(TARGET_FILE), "eleven").unwrap();
        assert_eq!(store.load_target(), DEFAULT_DAILY_TARGET);
    }

    #[test]
    fn test_view_roundtrip_and_default() {
        let (store, _temp) = test_store();
        assert_eq!(store.load_view(), View::Home);

        store.save_view(View::History).unwrap();
        assert_eq!(store.load_view(), View::History);
    }

    #[test]
    fn test_session_key_roundtrip() {
        let (store, _temp) = test_store();
        assert_eq!(store.load_session_key(), None);

        store.save_session_key("A1B2C3").unwrap();
        assert_eq!(store.load_session_key(), Some("A1B2C3".to_string()));

        store.clear_session_key().unwrap();
        assert_eq!(store.load_session_key(), None);
    }

    #[test]
    fn test_clear_session_key_when_missing_is_ok() {
        let (store, _temp) = test_store();
        store.clear_session_key().unwrap();
    }

    #[test]
    fn test_clear_all_wipes_everything_including_session() {
        let (store, _temp) = test_store();
        store.save_events(&[DrinkEvent::at(1)]).unwrap();
        store.save_target(9).unwrap();
        store.save_view(View::Settings).unwrap();
        store.save_session_key("A1B2C3").unwrap();

        store.clear_all().unwrap();

        assert!(store.load_events().is_empty());
        assert_eq!(store.load_target(), DEFAULT_DAILY_TARGET);
        assert_eq!(store.load_view(), View::Home);
        assert_eq!(store.load_session_key(), None);
    }

    #[test]
    fn test_save_creates_data_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested").join("data");
        let store = LocalStore::new(nested.clone());

        store.save_target(8).unwrap();
        assert!(nested.exists());
    }
}
