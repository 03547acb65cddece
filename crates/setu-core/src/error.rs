//! Error types for the SkillSetu client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Nothing in this taxonomy is
/// fatal: the worst case is a user-visible message with a retry affordance.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ClientError {
    /// Transport-level failure (no response, timeout, connection refused)
    #[error("network error: {message}")]
    Network { message: String },

    /// The server answered with a non-success status
    #[error("server rejected the request ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Credentials were rejected (401)
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The session is valid but not allowed to do this (403 or role pre-check)
    #[error("not authorized: {0}")]
    Forbidden(String),

    /// Input rejected before any network call was issued
    #[error("invalid input: {0}")]
    Validation(String),

    /// Durable storage failure
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl ClientError {
    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a Forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if this is a transport-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// The message a view should show for this failure.
    ///
    /// Server-provided detail is passed through; transport and internal
    /// failures get a generic retryable message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { detail, .. } => detail.clone(),
            Self::Auth(detail) | Self::Forbidden(detail) | Self::Validation(detail) => {
                detail.clone()
            }
            Self::Network { .. } => "Network error - please try again.".to_string(),
            Self::Storage { .. } | Self::Serialization { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_passes_server_detail_through() {
        let err = ClientError::Api {
            status: 409,
            detail: "Phone number already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Phone number already registered");
    }

    #[test]
    fn user_message_is_generic_for_transport_failures() {
        let err = ClientError::network("connection refused");
        assert!(err.is_network());
        assert_eq!(err.user_message(), "Network error - please try again.");
    }
}
