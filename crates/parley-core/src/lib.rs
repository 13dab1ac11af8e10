//! Domain layer of the Parley conversational client.
//!
//! This crate holds the controller's state types and capability seams:
//! conversation history, citation panel, identity resolution, and the
//! storage/view-effect traits that keep the core testable without a real
//! browser or filesystem environment. Request dispatch lives in
//! `parley-interaction`; concrete storage in `parley-infrastructure`.

pub mod config;
pub mod conversation;
pub mod error;
pub mod identity;
pub mod storage;
pub mod view;

// Re-export common error type
pub use error::ParleyError;
