//! Protected-navigation guard.
//!
//! A pure decision function over `(Session, requested destination)`: views
//! that require an authenticated session either render or redirect to the
//! login entry point, remembering where the visitor wanted to go so a
//! successful login can forward them there instead of the default landing.

use crate::session::Session;

/// Route paths understood by the client shell.
pub mod routes {
    pub const LANDING: &str = "/";
    pub const SIGNUP: &str = "/signup";
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/home";
    pub const JOBS: &str = "/jobs";
    pub const PROFILE: &str = "/profile";
    pub const POST_JOB: &str = "/post-job";

    /// Destinations that require an authenticated session.
    pub const PROTECTED: &[&str] = &[DASHBOARD, JOBS, PROFILE, POST_JOB];

    /// Whether `path` requires an authenticated session.
    pub fn is_protected(path: &str) -> bool {
        PROTECTED.contains(&path)
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested destination.
    Allow,
    /// Redirect to `to`, carrying the originally requested destination.
    Redirect { to: String, remembered: String },
}

/// Decides whether `requested` may render for the given session.
///
/// Public destinations always render. Protected destinations render only
/// when a credential is present; otherwise the visitor is sent to the login
/// route with `requested` remembered for the post-login forward.
pub fn check(session: &Session, requested: &str) -> RouteDecision {
    if !routes::is_protected(requested) || session.is_authenticated() {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect {
            to: routes::LOGIN.to_string(),
            remembered: requested.to_string(),
        }
    }
}

/// Resolves where a successful login should navigate: the remembered
/// destination when one was carried through the redirect, the dashboard
/// otherwise.
pub fn after_login(remembered: Option<&str>) -> String {
    remembered
        .filter(|path| !path.is_empty())
        .unwrap_or(routes::DASHBOARD)
        .to_string()
}
