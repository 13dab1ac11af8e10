//! JSON-file-backed key-value store.
//!
//! The device store is a single flat JSON object on disk. Entries are tiny
//! (a guest identifier, an auth marker), so the whole map is rewritten on
//! every `set`/`remove` and cached in memory between operations.

use crate::paths::ParleyPaths;
use async_trait::async_trait;
use parley_core::error::Result;
use parley_core::storage::KeyValueStore;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Key-value store persisting to a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    /// Lazily loaded map cache; `None` until first access.
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl JsonFileStore {
    /// Creates a store backed by the given file. The file is created on
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Creates a store at the platform default location.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform config directory cannot be
    /// determined.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(ParleyPaths::device_store_file()?))
    }

    async fn load(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn ensure_loaded(
        &self,
        cache: &mut Option<HashMap<String, String>>,
    ) -> Result<()> {
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        Ok(())
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cache = self.cache.write().await;
        self.ensure_loaded(&mut cache).await?;
        Ok(cache.as_ref().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        self.ensure_loaded(&mut cache).await?;
        let entries = cache.as_mut().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(entries).await?;
        tracing::debug!(key, "Persisted device store entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        self.ensure_loaded(&mut cache).await?;
        let entries = cache.as_mut().unwrap();
        if entries.remove(key).is_some() {
            self.persist(entries).await?;
        }
        Ok(())
    }
}
