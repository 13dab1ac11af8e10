//! Controller configuration loading.
//!
//! The configuration file is optional: an absent file yields the built-in
//! defaults, and a partial file only overrides the keys it names.

use crate::paths::ParleyPaths;
use parley_core::config::ControllerConfig;
use parley_core::error::Result;
use std::path::Path;

/// Loads the controller configuration from the platform config file.
pub async fn load_controller_config() -> Result<ControllerConfig> {
    let path = ParleyPaths::config_file()?;
    load_controller_config_from(&path).await
}

/// Loads the controller configuration from an explicit path.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or parsed.
pub async fn load_controller_config_from(path: &Path) -> Result<ControllerConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(toml::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(ControllerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
