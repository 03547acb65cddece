//! Job posting flow.

use std::sync::Arc;

use setu_core::error::{ClientError, Result};
use setu_core::session::SessionManager;
use setu_infrastructure::ApiClient;
use setu_types::{JobCreate, JobListing};

/// Input for [`JobPostingUseCase::post`], straight from the posting form.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub location_area: String,
    pub skill_ids: Vec<i64>,
}

/// The employer-only posting flow.
pub struct JobPostingUseCase {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
}

impl JobPostingUseCase {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// Whether the posting affordance should be shown at all.
    ///
    /// True only when the cached profile says employer. A missing profile
    /// counts as "maybe" and keeps the affordance hidden.
    pub fn can_post(&self) -> bool {
        self.session
            .current()
            .role()
            .is_some_and(|role| role.can_post_jobs())
    }

    /// Validates and submits a job listing.
    ///
    /// Field validation and the cached-role check both happen before any
    /// network call: a seeker is rejected with an explanatory message and
    /// no request is issued. The role pre-check is an optimization only -
    /// the server enforces the same rule and its rejection surfaces as a
    /// recoverable [`ClientError::Forbidden`].
    pub async fn post(&self, draft: JobDraft) -> Result<JobListing> {
        let title = draft.title.trim();
        let description = draft.description.trim();
        let location_area = draft.location_area.trim();

        if title.is_empty() {
            return Err(ClientError::validation("Please enter a job title"));
        }
        if description.is_empty() {
            return Err(ClientError::validation("Please enter a job description"));
        }
        if location_area.is_empty() {
            return Err(ClientError::validation("Please enter a location area"));
        }
        if draft.skill_ids.is_empty() {
            return Err(ClientError::validation(
                "Please select at least one required skill",
            ));
        }

        // Block only when the cached role is known and not employer; an
        // unknown profile defers to the server.
        if let Some(role) = self.session.current().role() {
            if !role.can_post_jobs() {
                return Err(ClientError::forbidden(
                    "Only employer accounts can post jobs. Switch to an employer account or create one.",
                ));
            }
        }

        let request = JobCreate {
            title: title.to_string(),
            description: description.to_string(),
            location_area: location_area.to_string(),
            required_skills: draft.skill_ids,
        };
        self.api.create_job(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_core::config::ClientConfig;
    use setu_infrastructure::MemoryStore;
    use setu_types::{Role, User};

    fn user(role: Role) -> User {
        User {
            id: 1,
            name: "Asha".to_string(),
            role,
            phone_number: "9999999999".to_string(),
            location_area: "Pune".to_string(),
            company_name: None,
            is_active: true,
            skills: Vec::new(),
        }
    }

    // Points at a closed port; a Validation or Forbidden result proves the
    // request never reached the network.
    fn use_case(role: Option<Role>) -> JobPostingUseCase {
        let session = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
        if let Some(role) = role {
            session.login("tok", user(role)).unwrap();
        }
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let api = Arc::new(ApiClient::new(&config, session.clone()).unwrap());
        JobPostingUseCase::new(api, session)
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: "Frontend Developer".to_string(),
            description: "Build the job board".to_string(),
            location_area: "Remote".to_string(),
            skill_ids: vec![1, 3],
        }
    }

    #[tokio::test]
    async fn seeker_is_blocked_client_side() {
        let jobs = use_case(Some(Role::Seeker));
        assert!(!jobs.can_post());

        let err = jobs.post(draft()).await.unwrap_err();
        assert!(err.is_forbidden());
        assert!(err.user_message().contains("employer accounts"));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_the_role_check() {
        let jobs = use_case(Some(Role::Seeker));
        let err = jobs
            .post(JobDraft {
                title: "  ".to_string(),
                ..draft()
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = jobs
            .post(JobDraft {
                skill_ids: Vec::new(),
                ..draft()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please select at least one required skill"
        );
    }

    #[tokio::test]
    async fn employer_attempt_reaches_the_network() {
        let jobs = use_case(Some(Role::Employer));
        assert!(jobs.can_post());

        // Validation and role checks pass; the closed port turns the actual
        // submission into a transport failure.
        let err = jobs.post(draft()).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn unknown_role_defers_to_the_server() {
        let jobs = use_case(None);
        assert!(!jobs.can_post());

        let err = jobs.post(draft()).await.unwrap_err();
        assert!(err.is_network());
    }
}
