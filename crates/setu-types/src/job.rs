//! Job listing models.
//!
//! Listings arrive from several upstream sources that disagree about how the
//! employer is represented: some embed an employer object, some use one of a
//! pile of legacy flat fields, some only carry a numeric identifier. The
//! model keeps all of those surfaces so the display-name resolution can try
//! them in a fixed, auditable order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::user::Skill;

/// Employer details when a listing embeds them as an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployerInfo {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
}

/// A single job listing. Read-only from the client's perspective except for
/// the creation path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_area: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub employer: Option<EmployerInfo>,
    // Legacy flat employer aliases. Some sources put non-string values in
    // these slots; those collapse to None rather than failing the listing.
    #[serde(default, deserialize_with = "lenient_string")]
    pub employer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub posted_by_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub posted_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub creator_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_by_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employer_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contact_name: Option<String>,
    #[serde(default, alias = "employerId")]
    pub employer_id: Option<i64>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub required_skills: Vec<Skill>,
}

impl JobListing {
    /// The listing title, falling back through the known aliases.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.job_title.as_deref())
            .unwrap_or("Untitled Job")
    }

    /// The listing location, falling back through the known aliases.
    pub fn display_location(&self) -> &str {
        self.location
            .as_deref()
            .or(self.location_area.as_deref())
            .or(self.city.as_deref())
            .unwrap_or("")
    }
}

/// Accepts strings as-is and numbers as their decimal rendering; any other
/// shape (object, array, bool, null) yields `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts integers as-is and numeric strings; any other shape yields `None`.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_listing_deserializes() {
        let listing: JobListing = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(listing.id, 12);
        assert_eq!(listing.display_title(), "Untitled Job");
        assert_eq!(listing.display_location(), "");
    }

    #[test]
    fn title_and_location_aliases() {
        let listing: JobListing =
            serde_json::from_str(r#"{"id": 1, "job_title": "Plumber", "city": "Nashik"}"#).unwrap();
        assert_eq!(listing.display_title(), "Plumber");
        assert_eq!(listing.display_location(), "Nashik");
    }

    #[test]
    fn non_string_alias_collapses_to_none() {
        let listing: JobListing = serde_json::from_str(
            r#"{"id": 3, "posted_by": {"weird": true}, "owner": 42, "created_by": "9"}"#,
        )
        .unwrap();
        assert_eq!(listing.posted_by, None);
        assert_eq!(listing.owner.as_deref(), Some("42"));
        assert_eq!(listing.created_by, Some(9));
    }

    #[test]
    fn embedded_employer_and_skills() {
        let listing: JobListing = serde_json::from_str(
            r#"{
                "id": 5,
                "title": "Electrician",
                "employer": {"name": "GridWorks"},
                "required_skills": [{"id": 2, "name": "Wiring"}]
            }"#,
        )
        .unwrap();
        assert_eq!(listing.employer.unwrap().name.as_deref(), Some("GridWorks"));
        assert_eq!(listing.required_skills[0].name, "Wiring");
    }
}
