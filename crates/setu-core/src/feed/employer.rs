//! Employer display-name resolution.
//!
//! Listing sources disagree about where the employer's name lives. The
//! resolution is an ordered list of extractors tried in sequence so the
//! fallback order stays auditable; reordering the table changes behavior.

use setu_types::JobListing;

type Extractor = fn(&JobListing) -> Option<String>;

/// Flat alias fields, in resolution order.
const FLAT_NAME_CANDIDATES: &[Extractor] = &[
    |job| non_empty(&job.employer_name),
    |job| non_empty(&job.company),
    |job| non_empty(&job.posted_by_name),
    |job| non_empty(&job.posted_by),
    |job| non_empty(&job.owner_name),
    |job| non_empty(&job.owner),
    |job| non_empty(&job.user_name),
    |job| non_empty(&job.creator_name),
    |job| non_empty(&job.created_by_name),
    |job| non_empty(&job.employer_phone),
    |job| non_empty(&job.phone_number),
    |job| non_empty(&job.contact_name),
];

/// Resolves the name to display for a listing's employer.
///
/// Order: an embedded employer object's fields (falling back to the literal
/// `"Employer"` without consulting the flat aliases), then the flat alias
/// fields, then `Employer #<id>` from the first known identifier, then
/// `"Unknown Employer"`.
pub fn employer_display_name(job: &JobListing) -> String {
    if let Some(info) = &job.employer {
        return non_empty(&info.name)
            .or_else(|| non_empty(&info.full_name))
            .or_else(|| non_empty(&info.display_name))
            .or_else(|| non_empty(&info.username))
            .or_else(|| non_empty(&info.phone_number))
            .unwrap_or_else(|| "Employer".to_string());
    }

    for extract in FLAT_NAME_CANDIDATES {
        if let Some(name) = extract(job) {
            return name;
        }
    }

    if let Some(id) = job.employer_id.or(job.owner_id).or(job.created_by) {
        return format!("Employer #{id}");
    }

    "Unknown Employer".to_string()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
