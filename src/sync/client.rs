//! HTTP client for the key-addressed remote blob store.
//!
//! The remote provider is any service that stores one JSON document per
//! opaque key and speaks plain GET/POST/PUT, such as a public JSON bin
//! endpoint. Every failure is converted to a [`SyncError`] at this
//! boundary; nothing here panics past it.

use rand::Rng;
use reqwest::StatusCode;

use super::error::SyncError;
use crate::models::SyncSnapshot;

/// Default remote endpoint (a public JSON bin service).
pub const DEFAULT_SERVER_URL: &str = "https://api.npoint.io";

const KEY_LENGTH: usize = 6;
const KEY_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Operations the reconciliation engine needs from a remote store.
///
/// All three are asynchronous and fallible; failures come back as tagged
/// results so the engine can pattern-match without a recovery block.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Provisions a new remote slot seeded with `snapshot`, returning the
    /// newly generated opaque key.
    async fn create(&self, snapshot: &SyncSnapshot) -> Result<String, SyncError>;

    /// Overwrites the content at `key` with `snapshot`.
    async fn push(&self, key: &str, snapshot: &SyncSnapshot) -> Result<(), SyncError>;

    /// Fetches the content at `key`. Distinguishes [`SyncError::NotFound`]
    /// from other failures so the engine can branch on it.
    async fn pull(&self, key: &str) -> Result<SyncSnapshot, SyncError>;
}

/// Reqwest-backed [`RemoteStore`] implementation.
pub struct CloudClient {
    base_url: String,
    client: reqwest::Client,
}

impl CloudClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn bin_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

impl RemoteStore for CloudClient {
    async fn create(&self, snapshot: &SyncSnapshot) -> Result<String, SyncError> {
        // The provider does not mint keys; we generate a short shareable
        // one client-side and seal it with an initial push.
        let key = generate_sync_key();
        self.push(&key, snapshot).await?;
        Ok(key)
    }

    async fn push(&self, key: &str, snapshot: &SyncSnapshot) -> Result<(), SyncError> {
        let url = self.bin_url(key);

        let response = self
            .client
            .post(&url)
            .json(snapshot)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        // Some bin providers reject POST once the bin exists; retry as PUT.
        let retry = self
            .client
            .put(&url)
            .json(snapshot)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if retry.status().is_success() {
            Ok(())
        } else {
            Err(SyncError::Server(retry.status().as_u16()))
        }
    }

    async fn pull(&self, key: &str) -> Result<SyncSnapshot, SyncError> {
        let response = self
            .client
            .get(self.bin_url(key))
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SyncError::NotFound);
        }
        if !response.status().is_success() {
            return Err(SyncError::Server(response.status().as_u16()));
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SyncError::MalformedData(e.to_string()))?;

        SyncSnapshot::from_value(value)
    }
}

/// Generates a short shareable session key (e.g. `A1B2C3`).
pub fn generate_sync_key() -> String {
    let mut rng = rand::rng();
    (0..KEY_LENGTH)
        .map(|_| KEY_CHARS[rng.random_range(0..KEY_CHARS.len())] as char)
        .collect()
}

/// Normalizes user-entered session keys: pasted URLs are reduced to their
/// final path segment, whitespace is trimmed.
pub fn normalize_sync_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let key = match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    };
    if key.len() < 4 {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_url() {
        let client = CloudClient::new("https://api.npoint.io");
        assert_eq!(client.bin_url("A1B2C3"), "https://api.npoint.io/A1B2C3");
    }

    #[test]
    fn test_bin_url_trims_trailing_slash() {
        let client = CloudClient::new("https://api.npoint.io/");
        assert_eq!(client.bin_url("A1B2C3"), "https://api.npoint.io/A1B2C3");
    }

    #[test]
    fn test_generated_key_shape() {
        for _ in 0..50 {
            let key = generate_sync_key();
            assert_eq!(key.len(), KEY_LENGTH);
            assert!(key.bytes().all(|b| KEY_CHARS.contains(&b)));
        }
    }

    #[test]
    fn test_normalize_plain_key() {
        assert_eq!(normalize_sync_key(" A1B2C3 "), Some("A1B2C3".to_string()));
    }

    #[test]
    fn test_normalize_pasted_url() {
        assert_eq!(
            normalize_sync_key("https://api.npoint.io/A1B2C3"),
            Some("A1B2C3".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_short_keys() {
        assert_eq!(normalize_sync_key("abc"), None);
        assert_eq!(normalize_sync_key(""), None);
        assert_eq!(normalize_sync_key("https://host/ab"), None);
    }
}
