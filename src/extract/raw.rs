//! Raw request metadata binding.

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, Uri};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::BindResult;
use crate::extract::FromRequest;

/// A copy of the inbound request's metadata.
///
/// For handlers that inspect the request directly instead of declaring a
/// decoded shape. The binding is an owned snapshot; construction never fails.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    /// The id assigned to this dispatch, as carried in the binder's logs.
    pub request_id: Uuid,
}

#[async_trait]
impl FromRequest for RawRequest {
    async fn from_request(ctx: &mut RequestContext) -> BindResult<Self> {
        Ok(Self {
            method: ctx.method().clone(),
            uri: ctx.uri().clone(),
            headers: ctx.headers().clone(),
            request_id: ctx.request_id(),
        })
    }
}
