//! In-memory key-value store for tests and ephemeral embeddings.

use async_trait::async_trait;
use parley_core::error::Result;
use parley_core::storage::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// Non-persistent store; every instance starts empty.
///
/// Useful in tests and for embeddings that deliberately forget the guest
/// identity between runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}
