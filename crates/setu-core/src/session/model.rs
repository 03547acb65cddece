//! Session domain model.

use serde::{Deserialize, Serialize};
use setu_types::{Role, User};

/// Snapshot of the authentication state.
///
/// `profile` is only meaningful while `credential` is present; the two are
/// always set and cleared together by the session manager, never partially.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub credential: Option<String>,
    pub profile: Option<User>,
}

impl Session {
    /// Whether a credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The profile's role, if a profile is held.
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|profile| profile.role)
    }

    /// Display name for navigation chrome; empty when logged out.
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|profile| profile.name.as_str())
            .unwrap_or("")
    }
}
