//! Controller activity state.

use serde::{Deserialize, Serialize};

/// The controller's single in-flight operation state.
///
/// At most one outbound operation runs at a time; send and upload share
/// this state and are therefore mutually exclusive. Modeling the state as
/// one value (instead of independent booleans) makes inconsistent
/// combinations unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// No operation in flight; new sends and uploads are accepted.
    #[default]
    Idle,
    /// An ask request is awaiting its response.
    Sending,
    /// A file upload is awaiting its response.
    Uploading,
}

impl Activity {
    pub fn is_idle(self) -> bool {
        matches!(self, Activity::Idle)
    }

    /// Whether an operation is in flight (the view's loading indicator).
    pub fn is_pending(self) -> bool {
        !self.is_idle()
    }
}
