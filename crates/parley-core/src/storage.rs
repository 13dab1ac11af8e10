//! Device key-value storage capability.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract key-value store for small device-persisted entries.
///
/// This trait decouples the controller from the concrete storage
/// environment (browser local storage, a JSON file on disk, an in-memory
/// map in tests). Values are opaque strings; keys are flat.
///
/// # Implementation Notes
///
/// Implementations should make `set` durable before returning so that a
/// freshly generated guest identifier survives a reload.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` if present. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
