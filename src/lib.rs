//! HydroTrack
//!
//! A personal hydration tracker: log glasses of water, compare daily
//! counts against a configurable target, review history, and optionally
//! synchronize across devices through a key-addressed cloud blob store.

pub mod commands;
pub mod config;
pub mod models;
pub mod state;
pub mod store;
pub mod sync;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
