//! Error responses for the web layer.
//!
//! Every failure ends the request with a plain-text 200 response. Input
//! and credential problems carry their own message; anything unexpected
//! is logged and answered with a generic one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::auth::{LoginError, RegistrationError, SessionError};
use crate::OrchardError;

/// Message shown for unexpected failures.
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// Handler-boundary error.
#[derive(Debug)]
pub enum WebError {
    /// A user-facing message, returned with status 200.
    Message(String),
    /// An unexpected failure, returned with status 200 and a generic
    /// message. Details have already been logged.
    Internal,
}

impl WebError {
    /// Create a user-facing message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Log an unexpected failure and hide its details from the client.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!("Internal error: {}", err);
        Self::Internal
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Message(message) => (StatusCode::OK, message).into_response(),
            WebError::Internal => (StatusCode::OK, GENERIC_FAILURE).into_response(),
        }
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebError::Message(message) => write!(f, "{message}"),
            WebError::Internal => write!(f, "{GENERIC_FAILURE}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<OrchardError> for WebError {
    fn from(err: OrchardError) -> Self {
        WebError::internal(err)
    }
}

impl From<RegistrationError> for WebError {
    fn from(err: RegistrationError) -> Self {
        if err.is_user_error() {
            WebError::message(err.to_string())
        } else {
            WebError::internal(err)
        }
    }
}

impl From<LoginError> for WebError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => WebError::message(err.to_string()),
            LoginError::Database(e) => WebError::internal(e),
        }
    }
}

impl From<SessionError> for WebError {
    fn from(err: SessionError) -> Self {
        WebError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_ok_status() {
        let response = WebError::message("Passwords do not match.").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_internal_hides_details() {
        let err = WebError::internal("disk on fire");
        assert_eq!(err.to_string(), GENERIC_FAILURE);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_registration_error_mapping() {
        let err: WebError = RegistrationError::UsernameTaken.into();
        assert_eq!(err.to_string(), "Username already taken.");

        let err: WebError =
            RegistrationError::Database(OrchardError::Database("locked".into())).into();
        assert!(matches!(err, WebError::Internal));
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_login_error_mapping() {
        let err: WebError = LoginError::InvalidCredentials.into();
        assert_eq!(err.to_string(), "Login failed. Please try again.");

        let err: WebError = LoginError::Database(OrchardError::Database("gone".into())).into();
        assert!(matches!(err, WebError::Internal));
    }
}
