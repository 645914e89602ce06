//! Key-value persistence primitive and JSON helpers on top of it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Entry holding the JSON array of registered users.
pub const USERS_KEY: &str = "users";
/// Entry holding the JSON array of issued certificates.
pub const CERTIFICATES_KEY: &str = "certificates";
/// Entry holding the active session's public identity (absent when anonymous).
pub const SESSION_KEY: &str = "user";

/// Get/set/remove by string key, values are text.
///
/// Implementations must make `set` all-or-nothing: after a failed write the
/// previous value is still readable.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Reads a JSON array entry. A missing entry is an empty list.
pub async fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("entry '{}' is not a valid JSON array", key)),
        None => Ok(Vec::new()),
    }
}

/// Replaces a JSON array entry.
pub async fn save_list<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw).await
}

/// Reads a JSON object entry without failing on malformed content.
///
/// Returns `Ok(None)` for a missing entry and `Err` only when the backend itself
/// fails; a parse error is reported separately so callers can decide to ignore it.
pub async fn load_entry<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<std::result::Result<T, serde_json::Error>>> {
    Ok(store.get(key).await?.map(|raw| serde_json::from_str(&raw)))
}

pub async fn save_entry<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
