//! Uploaded file binding.

use async_trait::async_trait;
use axum::body::Bytes;

use crate::context::RequestContext;
use crate::error::{BindError, BindResult};
use crate::extract::FromRequest;

/// The multipart field name an upload must be posted under.
pub const FILE_FIELD: &str = "file";

/// A single uploaded file, taken from the multipart field named `"file"`.
///
/// The bytes are handed to the handler as-is; persisting them anywhere is
/// the handler's business, not the binder's.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, if any.
    pub filename: Option<String>,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    /// The file's bytes.
    pub data: Bytes,
}

#[async_trait]
impl FromRequest for UploadedFile {
    async fn from_request(ctx: &mut RequestContext) -> BindResult<Self> {
        let form = ctx
            .form()
            .await
            .map_err(|e| BindError::capability(format!("could not get file: {e}")))?;
        let part = form.file(FILE_FIELD).ok_or_else(|| {
            BindError::capability(format!(
                "could not get file: no multipart field named '{FILE_FIELD}'"
            ))
        })?;

        Ok(Self {
            filename: part.filename.clone(),
            content_type: part.content_type.clone(),
            data: part.data.clone(),
        })
    }
}
