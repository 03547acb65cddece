//! Request and response payloads for the marketplace API.

use serde::{Deserialize, Serialize};

use crate::user::Role;

/// Bearer token issued by `POST /token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Body for `POST /signup/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub phone_number: String,
    pub name: String,
    pub location_area: String,
    pub password: String,
    pub role: Role,
}

/// Body for `POST /jobs/`. `required_skills` carries skill ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub description: String,
    pub location_area: String,
    pub required_skills: Vec<i64>,
}

/// Body for `PUT /users/me`. `None` fields are left out of the JSON so the
/// server only touches what the caller actually set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Body for `PUT /users/me/skills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsUpdate {
    pub skill_ids: Vec<i64>,
}
