//! Per-request context.
//!
//! # Responsibilities
//! - Buffer the raw body once so it can be re-read across resolution attempts
//! - Snapshot request metadata (method, URI, headers)
//! - Parse single-valued query pairs on demand
//! - Parse and cache the multipart form when a resolver asks for it
//!
//! # Design Decisions
//! - The body is held as `Bytes`: every parameter binding sees the complete,
//!   unconsumed bytes without rewinding a stream
//! - Multipart parsing is lazy and happens at most once per request
//! - The context is exclusively owned by one in-flight dispatch and dropped
//!   when its response is sent

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, Uri};
use uuid::Uuid;

use crate::config::BinderConfig;
use crate::error::{BindError, BindResult};

/// Transient per-invocation request state.
#[derive(Debug)]
pub struct RequestContext {
    request_id: Uuid,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    form: Option<MultipartForm>,
}

impl RequestContext {
    /// Build a context from an inbound request, buffering the body.
    ///
    /// A body larger than `config.max_body_bytes` is a client error.
    pub(crate) async fn from_request(
        request: Request<Body>,
        config: &BinderConfig,
        request_id: Uuid,
    ) -> BindResult<Self> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, config.max_body_bytes)
            .await
            .map_err(|e| BindError::decode(format!("could not read request body: {e}")))?;

        Ok(Self {
            request_id,
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            form: None,
        })
    }

    /// Unique id assigned to this dispatch, carried through all log events.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The complete buffered body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Whether the request declares a multipart content type.
    pub fn is_multipart(&self) -> bool {
        self.header(header::CONTENT_TYPE.as_str())
            .map(|ct| ct.starts_with("multipart"))
            .unwrap_or(false)
    }

    /// Query-string pairs in order of appearance, multiplicity preserved.
    ///
    /// The decoder decides what to do with repeated keys; this accessor
    /// reports them all.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self.uri.query() {
            Some(query) => url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The parsed multipart form, parsing and caching it on first access.
    ///
    /// Fails when the request is not multipart or the body is malformed.
    pub async fn form(&mut self) -> BindResult<&MultipartForm> {
        if self.form.is_none() {
            let content_type = self
                .header(header::CONTENT_TYPE.as_str())
                .ok_or_else(|| BindError::decode("request has no content type"))?
                .to_string();
            let parsed = MultipartForm::parse(&content_type, self.body.clone()).await?;
            self.form = Some(parsed);
        }
        Ok(self.form.as_ref().expect("form populated above"))
    }
}

/// A parsed `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartForm {
    /// Parse a buffered multipart body.
    pub(crate) async fn parse(content_type: &str, body: Bytes) -> BindResult<Self> {
        let boundary = multer::parse_boundary(content_type)
            .map_err(|e| BindError::decode(format!("invalid multipart content type: {e}")))?;

        let stream = futures_util::stream::once(async move {
            Ok::<Bytes, std::convert::Infallible>(body)
        });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut form = MultipartForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| BindError::decode(format!("unparseable multipart body: {e}")))?
        {
            let name = match field.name() {
                Some(name) => name.to_string(),
                // Nameless parts carry nothing a handler can address.
                None => continue,
            };
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(|m| m.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| BindError::decode(format!("unparseable multipart body: {e}")))?;

            if filename.is_some() {
                form.files.push(FilePart {
                    field: name,
                    filename,
                    content_type,
                    data,
                });
            } else {
                let text = String::from_utf8_lossy(&data).into_owned();
                form.fields.push((name, text));
            }
        }

        Ok(form)
    }

    /// Text fields in order of appearance, multiplicity preserved.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The first file part uploaded under the given field name.
    pub fn file(&self, field: &str) -> Option<&FilePart> {
        self.files.iter().find(|f| f.field == field)
    }
}

/// One uploaded file part of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name the file was posted under.
    pub field: String,
    /// Client-supplied file name, if any.
    pub filename: Option<String>,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    /// The file's bytes.
    pub data: Bytes,
}
