//! Request dispatch.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → pre-flight check (OPTIONS acknowledged immediately)
//!     → verb lookup in the endpoint's handler table
//!     → context build (body buffered once, bounded)
//!     → wrapped handler: bind params → invoke → encode
//!     → fault containment converts any panic into a server error
//!     → standard headers stamped on every outcome
//! ```
//!
//! # Design Decisions
//! - Handlers are wrapped into a uniform closure at registration; dispatch
//!   itself is type-blind
//! - Every response carries the permissive cross-origin header set; the JSON
//!   content type is stamped only when the payload did not set its own
//! - Client-input failures abort before invocation; handler errors and
//!   contained faults abort after. Nothing here retries

pub mod endpoint;
pub mod fault;
pub mod handler;

pub use endpoint::Endpoint;
pub use fault::FAULT_MARKER;
pub use handler::{Handler, HandlerMeta};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;
use uuid::Uuid;

use crate::config::BinderConfig;
use crate::context::RequestContext;

/// Allowed request headers advertised to cross-origin callers, including
/// the credential header capability impls conventionally read.
pub const ALLOW_HEADERS: &str = "Content-Type, idToken, originatorID";

/// The four supported verbs plus pre-flight.
pub const ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";

/// Run one request through the endpoint's pipeline.
pub(crate) async fn dispatch(
    endpoint: Arc<Endpoint>,
    config: Arc<BinderConfig>,
    request: Request<Body>,
) -> Response {
    // Permissive pre-flight: acknowledged for every registered path, no
    // handler invocation.
    if request.method() == Method::OPTIONS {
        return finalize(StatusCode::OK.into_response());
    }

    let slot = match endpoint.slot(request.method()) {
        Some(slot) => slot,
        None => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "no handler registered for verb"
            );
            return finalize(
                (StatusCode::NOT_IMPLEMENTED, "unsupported rest verb").into_response(),
            );
        }
    };

    let request_id = Uuid::new_v4();
    if config.log_requests {
        tracing::debug!(
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
            "dispatching request"
        );
    }

    let ctx = match RequestContext::from_request(request, &config, request_id).await {
        Ok(ctx) => ctx,
        Err(e) => return finalize(e.into_response()),
    };

    // The containment boundary: bind, invoke and encode all run under it.
    let response = match AssertUnwindSafe((slot.run)(ctx)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => fault::fault_response(panic, request_id),
    };

    finalize(response)
}

/// Stamp the standard headers onto an outcome.
///
/// Cross-origin headers go on unconditionally; the JSON content type only
/// when a self-encoding payload did not already set its own.
fn finalize(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    if !headers.contains_key(header::CONTENT_TYPE) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
    }
    response
}
