//! Outgoing request description handed to a [`Transport`](crate::Transport).

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, DATE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};

use crate::body::RequestBody;
use crate::error::TransportError;

/// How the transport should deliver the response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Read the whole body before returning, releasing the connection.
    #[default]
    Buffered,
    /// Return while the body is still on the wire; the caller pulls it.
    Streaming,
}

/// One request against the object store.
///
/// `path` is the resource path (always starting with `/`), resolved by the
/// transport against its base URL.
#[derive(Debug)]
pub struct TransportRequest {
    /// HTTP verb.
    pub method: Method,
    /// Percent-encoded resource path.
    pub path: String,
    /// Query parameters, appended in order.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional streaming request body.
    pub body: Option<RequestBody>,
    /// Response body delivery mode.
    pub mode: ResponseMode,
}

impl TransportRequest {
    /// Start a request for `method` against `path`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            mode: ResponseMode::Buffered,
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set a header, replacing any previous value.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Result<Self, TransportError> {
        let value = HeaderValue::from_str(value).map_err(|e| {
            TransportError::InvalidHeader(format!("{name}: {e}"))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the `Date` and `Authorization` headers of a signed request.
    pub fn with_signature(self, date: &str, authorization: &str) -> Result<Self, TransportError> {
        self.with_header(DATE, date)?
            .with_header(AUTHORIZATION, authorization)
    }

    /// Set the request `Content-Type`. An empty value leaves the header unset.
    pub fn with_content_type(self, content_type: &str) -> Result<Self, TransportError> {
        if content_type.is_empty() {
            return Ok(self);
        }
        self.with_header(CONTENT_TYPE, content_type)
    }

    /// Set the `Accept` header.
    pub fn with_accept(self, accept: &str) -> Result<Self, TransportError> {
        self.with_header(ACCEPT, accept)
    }

    /// Attach a request body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Ask the transport to stream the response body.
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.mode = ResponseMode::Streaming;
        self
    }

    /// The value of a request header, if set and printable.
    #[must_use]
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
