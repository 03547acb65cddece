//! Incremental job-feed module.
//!
//! - `controller`: paginated retrieval, page merging, client-side search
//! - `employer`: display-name resolution over the inconsistent upstream
//!   employer fields

mod controller;
mod employer;

pub use controller::{FeedState, JobFeedController, JobsGateway};
pub use employer::employer_display_name;
