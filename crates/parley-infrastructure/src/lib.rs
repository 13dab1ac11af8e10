//! Infrastructure layer: concrete storage and configuration backends for
//! the Parley conversation controller.

pub mod config_loader;
pub mod json_file_store;
pub mod memory_store;
pub mod paths;

pub use config_loader::{load_controller_config, load_controller_config_from};
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use paths::ParleyPaths;
