//! Registration, login and logout flows.

use std::sync::Arc;

use setu_core::error::{ClientError, Result};
use setu_core::session::SessionManager;
use setu_infrastructure::ApiClient;
use setu_types::{Role, SignupRequest, User};

/// Input for [`AuthUseCase::register`], straight from the signup form.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub phone_number: String,
    pub location_area: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

/// Authentication flows: signup, login, logout.
pub struct AuthUseCase {
    api: Arc<ApiClient>,
    session: Arc<SessionManager>,
}

impl AuthUseCase {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionManager>) -> Self {
        Self { api, session }
    }

    /// Registers a new account.
    ///
    /// Required fields and the password confirmation are validated before
    /// any network call; a validation failure is reported inline and no
    /// request is issued. Registration does not log the user in.
    pub async fn register(&self, form: SignupForm) -> Result<User> {
        let name = form.name.trim();
        let phone_number = form.phone_number.trim();
        let location_area = form.location_area.trim();

        if name.is_empty() {
            return Err(ClientError::validation("Please enter your name"));
        }
        if phone_number.is_empty() {
            return Err(ClientError::validation("Please enter your phone number"));
        }
        if location_area.is_empty() {
            return Err(ClientError::validation("Please enter your location area"));
        }
        if form.password.is_empty() {
            return Err(ClientError::validation("Please choose a password"));
        }
        if form.password != form.confirm_password {
            return Err(ClientError::validation("Passwords do not match"));
        }

        let request = SignupRequest {
            phone_number: phone_number.to_string(),
            name: name.to_string(),
            location_area: location_area.to_string(),
            password: form.password,
            role: form.role,
        };
        self.api.signup(&request).await
    }

    /// Authenticates and commits the session.
    ///
    /// Requests a token, fetches the profile with it, then commits both to
    /// the session manager in one step. A rejection at any point leaves the
    /// session exactly as it was - there is no partial login.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation(
                "Phone number and password are required",
            ));
        }

        let token = self.api.request_token(username, password).await?;
        let profile = self.api.profile_for_token(&token.access_token).await?;
        self.session.login(token.access_token, profile.clone())?;
        tracing::debug!(user = %profile.name, "login committed");
        Ok(profile)
    }

    /// Clears the session.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}
