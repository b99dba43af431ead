//! Per-request fault containment.
//!
//! A panic anywhere in the bind → invoke → encode sequence is caught at the
//! dispatch boundary and converted into a server-error response; it never
//! reaches the transport layer or takes down the serving process. Other
//! in-flight dispatches are unaffected.

use std::any::Any;
use std::backtrace::Backtrace;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Fixed marker carried in every fault response body.
pub const FAULT_MARKER: &str = "Server Panic";

/// Convert a caught panic into the fault response.
///
/// The body is a keyed JSON structure: the fixed marker, the panic message,
/// and a best-effort numbered breakdown of the captured backtrace.
pub(crate) fn fault_response(panic: Box<dyn Any + Send>, request_id: Uuid) -> Response {
    let message = panic_message(panic.as_ref());
    let backtrace = Backtrace::force_capture();

    tracing::error!(
        request_id = %request_id,
        panic = %message,
        "request dispatch panicked"
    );

    let mut trace = Map::new();
    trace.insert("error".to_string(), Value::String(FAULT_MARKER.to_string()));
    trace.insert("panic".to_string(), Value::String(message.to_string()));
    for (i, line) in backtrace.to_string().lines().enumerate() {
        trace.insert(i.to_string(), Value::String(line.trim().to_string()));
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        Value::Object(trace).to_string(),
    )
        .into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_downcasts() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn Any + Send> = Box::new("boom".to_string());
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }

    #[tokio::test]
    async fn test_fault_response_carries_marker() {
        let response = fault_response(Box::new("boom"), Uuid::new_v4());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["error"], Value::String(FAULT_MARKER.to_string()));
        assert_eq!(parsed["panic"], Value::String("boom".to_string()));
    }
}
