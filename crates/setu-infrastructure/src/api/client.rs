//! Marketplace API client.
//!
//! Thin reqwest wrapper over the marketplace endpoints. Whenever the session
//! holds a credential it is injected as a bearer header on every request;
//! callers never add the header themselves.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use setu_core::config::ClientConfig;
use setu_core::error::{ClientError, Result};
use setu_core::feed::JobsGateway;
use setu_core::session::SessionManager;
use setu_types::{JobCreate, JobListing, ProfileUpdate, SignupRequest, Skill, SkillsUpdate, Token, User};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the marketplace HTTP API.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Creates a client for the API at `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: Arc<SessionManager>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ClientError::network(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Registers a new account. `POST /signup/`
    pub async fn signup(&self, request: &SignupRequest) -> Result<User> {
        self.execute(self.authorize(self.http.post(self.url("/signup/"))).json(request))
            .await
    }

    /// Exchanges credentials for a bearer token. `POST /token`
    ///
    /// The token endpoint expects a form-urlencoded body, not JSON.
    pub async fn request_token(&self, username: &str, password: &str) -> Result<Token> {
        let form = [("username", username.trim()), ("password", password)];
        self.execute(self.authorize(self.http.post(self.url("/token"))).form(&form))
            .await
    }

    /// Fetches one page of job listings. `GET /jobs/?skip=&limit=`
    pub async fn list_jobs(&self, skip: usize, limit: usize) -> Result<Vec<JobListing>> {
        self.execute(
            self.authorize(self.http.get(self.url("/jobs/")))
                .query(&[("skip", skip), ("limit", limit)]),
        )
        .await
    }

    /// Creates a job listing. `POST /jobs/`
    pub async fn create_job(&self, request: &JobCreate) -> Result<JobListing> {
        self.execute(self.authorize(self.http.post(self.url("/jobs/"))).json(request))
            .await
    }

    /// Fetches the authenticated user's profile. `GET /users/me/`
    pub async fn current_profile(&self) -> Result<User> {
        self.execute(self.authorize(self.http.get(self.url("/users/me/"))))
            .await
    }

    /// Fetches the profile for an explicit token, used during login before
    /// the session holds the credential. `GET /users/me/`
    pub async fn profile_for_token(&self, token: &str) -> Result<User> {
        self.execute(self.http.get(self.url("/users/me/")).bearer_auth(token))
            .await
    }

    /// Updates profile fields. `PUT /users/me`
    pub async fn update_profile(&self, request: &ProfileUpdate) -> Result<User> {
        self.execute(self.authorize(self.http.put(self.url("/users/me"))).json(request))
            .await
    }

    /// Fetches the skill catalog. `GET /skills/`
    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        self.execute(self.authorize(self.http.get(self.url("/skills/"))))
            .await
    }

    /// Replaces the authenticated user's skills. `PUT /users/me/skills`
    pub async fn update_my_skills(&self, skill_ids: Vec<i64>) -> Result<User> {
        let request = SkillsUpdate { skill_ids };
        self.execute(
            self.authorize(self.http.put(self.url("/users/me/skills")))
                .json(&request),
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.current().credential {
            Some(credential) => request.bearer_auth(credential),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "marketplace API rejected request");
            return Err(status_error(status, &body));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::serialization(format!("unexpected response body: {err}")))
    }
}

#[async_trait]
impl JobsGateway for ApiClient {
    async fn list_jobs(&self, skip: usize, limit: usize) -> Result<Vec<JobListing>> {
        ApiClient::list_jobs(self, skip, limit).await
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    ClientError::network(message)
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let detail = extract_detail(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("request failed with status {status}")
        } else {
            body.trim().to_string()
        }
    });
    match status {
        StatusCode::UNAUTHORIZED => ClientError::auth(detail),
        StatusCode::FORBIDDEN => ClientError::forbidden(detail),
        _ => ClientError::Api {
            status: status.as_u16(),
            detail,
        },
    }
}

/// Pulls the `detail` field out of a FastAPI-style error body.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn client(base_url: &str) -> ApiClient {
        let config = ClientConfig {
            api_base_url: base_url.to_string(),
            ..Default::default()
        };
        let session = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = client("http://127.0.0.1:8000/");
        assert_eq!(api.url("/jobs/"), "http://127.0.0.1:8000/jobs/");
    }

    #[test]
    fn unauthorized_maps_to_auth_error() {
        let err = status_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Incorrect phone number or password"}"#,
        );
        assert!(err.is_auth());
        assert_eq!(err.user_message(), "Incorrect phone number or password");
    }

    #[test]
    fn forbidden_maps_to_forbidden_error() {
        let err = status_error(StatusCode::FORBIDDEN, r#"{"detail": "Employers only"}"#);
        assert!(err.is_forbidden());
    }

    #[test]
    fn structured_detail_is_flattened() {
        let err = status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#,
        );
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 422);
                assert!(detail.contains("field required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_body_gets_generic_detail() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            err.user_message(),
            "request failed with status 500 Internal Server Error"
        );
    }
}
