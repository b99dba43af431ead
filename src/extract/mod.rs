//! Parameter resolution.
//!
//! # Data Flow
//! ```text
//! Handler parameter type
//!     → capability impl of FromRequest (auth contexts, UploadedFile, RawRequest)
//!     → or Input<T>: structural decode + declarative validation
//! ```
//!
//! # Design Decisions
//! - Resolution strategy is selected by trait impl at registration time,
//!   never by runtime type inspection on the hot path
//! - Capability construction failures are client errors and abort the
//!   dispatch before the handler runs

pub mod file;
pub mod input;
pub mod raw;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::BindResult;

pub use file::{UploadedFile, FILE_FIELD};
pub use input::Input;
pub use raw::RawRequest;

/// Construct a handler parameter from the request.
///
/// This is the binder's sole extensibility point: any type may implement it
/// to carry custom, request-bound construction logic — for example an
/// authentication context that parses a credential header and verifies it,
/// or an optional variant of the same that tolerates an absent or invalid
/// credential without failing.
///
/// The context's body is fully buffered, so an implementation can read it
/// without starving parameters resolved after it.
#[async_trait]
pub trait FromRequest: Sized {
    async fn from_request(ctx: &mut RequestContext) -> BindResult<Self>;
}
