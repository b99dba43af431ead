//! Error types for binding and registration.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors raised while binding handler parameters from a request.
///
/// Every variant is a client-input failure and maps to a 400 outcome; the
/// error text is surfaced verbatim in the response body.
#[derive(Debug, Error)]
pub enum BindError {
    /// A capability's construction function rejected the request.
    #[error("{0}")]
    Capability(String),

    /// The body or query string could not be decoded into the target shape.
    #[error("{0}")]
    Decode(String),

    /// A declarative field rule failed on the decoded value.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl BindError {
    /// Shorthand for a capability construction failure.
    pub fn capability(message: impl Into<String>) -> Self {
        Self::Capability(message.into())
    }

    /// Shorthand for a decode failure.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Convert into the client-error response that aborts the dispatch.
    pub(crate) fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Result type for parameter binding.
pub type BindResult<T> = Result<T, BindError>;

/// Errors raised while registering routes, before serving begins.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Every verb slot of the endpoint was empty.
    #[error("route '{0}' has no verb handlers")]
    EmptyEndpoint(String),

    /// The path was already registered.
    #[error("route '{0}' is already registered")]
    DuplicatePath(String),

    /// The path does not start with '/'.
    #[error("route '{0}' must start with '/'")]
    InvalidPath(String),
}
