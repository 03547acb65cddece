//! User and skill domain models.

use serde::{Deserialize, Serialize};

/// Account role as reported by the server.
///
/// Roles gate the posting flow client-side, so a role string this client
/// does not know about must not fail deserialization of a whole `User`;
/// it collapses to [`Role::Unknown`] and the server stays authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seeker,
    Employer,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Whether this role is allowed to post job listings.
    pub fn can_post_jobs(&self) -> bool {
        matches!(self, Role::Employer)
    }
}

/// Immutable reference data describing a single skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The authenticated user's profile.
///
/// A copy of this may be cached by views, but the session-held instance is
/// the only authoritative one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub phone_number: String,
    pub location_area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

fn default_is_active() -> bool {
    true
}
