//! Use cases composing the SkillSetu core with its infrastructure.
//!
//! Each use case owns `Arc` handles to the collaborators it orchestrates
//! and exposes the operation a view calls, with validation and role checks
//! applied before any network traffic.

mod auth;
mod jobs;
mod profile;

pub use auth::{AuthUseCase, SignupForm};
pub use jobs::{JobDraft, JobPostingUseCase};
pub use profile::ProfileUseCase;
