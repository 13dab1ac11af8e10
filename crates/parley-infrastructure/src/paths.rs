//! Unified path management for parley configuration and device data.
//!
//! All parley state lives under one platform config directory:
//!
//! ```text
//! ~/.config/parley/            # Config directory
//! ├── config.toml              # Controller configuration
//! └── device_store.json        # Device key-value store (guest id, auth marker)
//! ```

use parley_core::error::{ParleyError, Result};
use std::path::PathBuf;

/// Unified path resolution for parley.
pub struct ParleyPaths;

impl ParleyPaths {
    /// Returns the parley configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the platform config directory cannot
    /// be determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("parley"))
            .ok_or_else(|| ParleyError::config("Cannot find config directory"))
    }

    /// Returns the path to the controller configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the device key-value store file.
    pub fn device_store_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("device_store.json"))
    }
}
