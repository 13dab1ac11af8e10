//! Guest and authenticated identity resolution.
//!
//! The controller consumes an existing authentication signal; it never runs
//! an authentication flow itself. When no authenticated identity exists, a
//! stable anonymous guest identifier is issued once per device and reused.

use crate::error::Result;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Storage key whose presence marks an authenticated session.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key holding the persisted guest identifier.
pub const GUEST_ID_KEY: &str = "guestId";

/// The resolved identity for one controller lifetime.
///
/// Exactly one `Session` exists per controller instance. `guest_id` is
/// stable across reloads for the same device until an authenticated
/// identity is established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The persisted guest identifier, present only for guest sessions.
    pub guest_id: Option<String>,
    /// Whether the current actor is an anonymous guest.
    pub is_guest: bool,
}

impl Session {
    /// An authenticated (non-guest) session.
    pub fn authenticated() -> Self {
        Self {
            guest_id: None,
            is_guest: false,
        }
    }

    /// A guest session with the given identifier.
    pub fn guest(guest_id: impl Into<String>) -> Self {
        Self {
            guest_id: Some(guest_id.into()),
            is_guest: true,
        }
    }
}

/// Resolves the current actor's identity from device storage.
///
/// No network calls are involved; resolution is pure local state.
pub struct IdentityProvider {
    store: Arc<dyn KeyValueStore>,
}

impl IdentityProvider {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Resolves the session identity.
    ///
    /// If a persisted authentication marker exists the session is
    /// authenticated. Otherwise the persisted guest identifier is reused;
    /// if none exists yet, a new one is generated and persisted before
    /// returning, so repeated resolutions on the same device yield the
    /// same identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if device storage cannot be read or written.
    pub async fn resolve(&self) -> Result<Session> {
        if self.store.get(AUTH_TOKEN_KEY).await?.is_some() {
            return Ok(Session::authenticated());
        }

        if let Some(guest_id) = self.store.get(GUEST_ID_KEY).await? {
            return Ok(Session::guest(guest_id));
        }

        let guest_id = Uuid::new_v4().to_string();
        self.store.set(GUEST_ID_KEY, &guest_id).await?;
        tracing::debug!("Issued new guest identifier");

        Ok(Session::guest(guest_id))
    }
}
