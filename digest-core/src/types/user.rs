//! User identity.

use serde::{Deserialize, Serialize};

/// Name used when a sender has neither a handle nor a first name.
pub const UNKNOWN_USERNAME: &str = "unknown";

/// User identity (id, handle, first name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    /// Display name: handle, then first name, then [`UNKNOWN_USERNAME`].
    pub fn display_name(&self) -> String {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.first_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or(UNKNOWN_USERNAME)
            .to_string()
    }
}
