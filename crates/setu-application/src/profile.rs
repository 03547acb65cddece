//! Profile viewing and editing flows.

use std::sync::Arc;

use setu_core::error::Result;
use setu_core::session::SessionManager;
use setu_infrastructure::ApiClient;
use setu_types::{ProfileUpdate, Skill, User};

/// Profile flows: loading the profile alongside the skill catalog and
/// persisting edits.
pub struct ProfileUseCase {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
}

impl ProfileUseCase {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// Loads the profile and the skill catalog.
    ///
    /// Both requests run concurrently and both must complete before either
    /// result is consumed; there is no ordering guarantee between them.
    pub async fn load(&self) -> Result<(User, Vec<Skill>)> {
        let (profile, skills) = tokio::join!(self.api.current_profile(), self.api.list_skills());
        Ok((profile?, skills?))
    }

    /// Persists basic-field edits and refreshes the cached session profile.
    pub async fn update_basic(&self, update: ProfileUpdate) -> Result<User> {
        let updated = self.api.update_profile(&update).await?;
        self.recommit(updated)
    }

    /// Replaces the user's skill selection and refreshes the cached session
    /// profile.
    pub async fn update_skills(&self, skill_ids: Vec<i64>) -> Result<User> {
        let updated = self.api.update_my_skills(skill_ids).await?;
        self.recommit(updated)
    }

    // Recommits the refreshed profile under the existing credential so
    // identity-dependent views converge on the new data.
    fn recommit(&self, updated: User) -> Result<User> {
        if let Some(credential) = self.session.current().credential {
            self.session.login(credential, updated.clone())?;
        }
        Ok(updated)
    }
}
