//! Typed request binding and dispatch for REST handlers.
//!
//! Expose an endpoint as an ordinary typed async function: parameters are
//! bound from the request, validated, the function is invoked, and its
//! result is encoded — with any panic contained at the request boundary.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → table.rs (route mounted on the host axum router)
//!     → dispatch/ (verb lookup, pre-flight, fault containment)
//!     → context.rs (body buffered once, query parsed)
//!     → extract/ (capability impls, or decode.rs + validate.rs)
//!     → handler invocation
//!     → reply.rs (JSON encoding, or a self-encoding payload)
//! ```
//!
//! Registration builds the table once at startup; serving shares it
//! read-only across concurrent dispatches.

// Core pipeline
pub mod context;
pub mod decode;
pub mod dispatch;
pub mod extract;
pub mod reply;
pub mod table;
pub mod validate;

// Cross-cutting concerns
pub mod config;
pub mod error;

pub use config::BinderConfig;
pub use context::{FilePart, MultipartForm, RequestContext};
pub use dispatch::{Endpoint, Handler, HandlerMeta, FAULT_MARKER};
pub use error::{BindError, BindResult, RegistrationError};
pub use extract::{FromRequest, Input, RawRequest, UploadedFile};
pub use reply::{Json, Reply};
pub use table::{RouteMeta, RouteTable, VerbMeta};
pub use validate::{rule, Blank, Validate, ValidationError};

// Implementors of FromRequest need the macro.
pub use async_trait::async_trait;
