//! Response encoding.
//!
//! The success payload of a handler implements [`Reply`]. [`Json`] is the
//! default encoding; a payload type with its own `Reply` impl is
//! self-encoding and bypasses the JSON encoder entirely.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A handler payload that knows how to become a response.
pub trait Reply {
    fn into_response(self) -> Response;
}

/// JSON-encoded success payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T: Serialize> Reply for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "response payload failed to encode");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("response encoding failed: {e}"),
                )
                    .into_response()
            }
        }
    }
}

/// The nil payload: a success outcome with an empty body.
impl Reply for () {
    fn into_response(self) -> Response {
        StatusCode::OK.into_response()
    }
}

/// A fully self-encoded response, handed through untouched.
impl Reply for Response {
    fn into_response(self) -> Response {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_payload_encodes() {
        let response = Json(json!({"ok": true})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_nil_payload_is_empty_success() {
        let response = Reply::into_response(());
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_self_encoded_response_passes_through() {
        let custom = (StatusCode::CREATED, "made it").into_response();
        let response = Reply::into_response(custom);
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
