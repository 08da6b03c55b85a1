//! The response envelope: one completed HTTP round trip.
//!
//! An envelope owns the status, headers, and at most one body stream and one
//! error stream. Text for each stream is decoded on first request and cached in a
//! write-once cell; later reads return the cached value without touching the
//! stream or the error handler again, even when the first decode failed.
//!
//! The cells are `std::cell` types, so an envelope is `Send` but not `Sync`: it
//! belongs to the thread that received it.

use std::cell::{OnceCell, RefCell};
use std::fmt;

use http::header::CONTENT_ENCODING;
use http::{HeaderMap, StatusCode};
use tracing::{debug, warn};

use crate::body::{BodyStream, decode_text};
use crate::error::{DecodeError, TransportError};

/// One stream of the response and its lazily decoded text.
struct TextChannel {
    stream: RefCell<Option<BodyStream>>,
    text: OnceCell<String>,
}

impl TextChannel {
    fn new(stream: Option<BodyStream>) -> Self {
        Self {
            stream: RefCell::new(stream),
            text: OnceCell::new(),
        }
    }

    fn is_present(&self) -> bool {
        self.text.get().is_some() || self.stream.borrow().is_some()
    }

    fn text(&self, gzipped: bool, on_error: &mut dyn FnMut(DecodeError)) -> &str {
        if let Some(text) = self.text.get() {
            return text;
        }
        let Some(stream) = self.stream.borrow_mut().take() else {
            return "";
        };
        self.text.get_or_init(|| match decode_text(stream, gzipped) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, gzipped, "Failed to decode response text");
                on_error(e);
                String::new()
            }
        })
    }

    fn into_stream(self) -> Option<BodyStream> {
        self.stream.into_inner()
    }
}

/// A completed HTTP response.
pub struct ResponseEnvelope {
    status: StatusCode,
    headers: HeaderMap,
    body: TextChannel,
    error: TextChannel,
}

impl ResponseEnvelope {
    /// Wrap a response. `body` carries a success payload, `error` the payload of
    /// a failed request; either may be absent.
    #[must_use]
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Option<BodyStream>,
        error: Option<BodyStream>,
    ) -> Self {
        Self {
            status,
            headers,
            body: TextChannel::new(body),
            error: TextChannel::new(error),
        }
    }

    /// The HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// All response headers; repeated headers keep every value in order.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether a body stream (or its decoded text) is present.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_present()
    }

    /// Whether one of the `Content-Encoding` values is exactly `gzip`.
    #[must_use]
    pub fn is_gzipped(&self) -> bool {
        self.headers
            .get_all(CONTENT_ENCODING)
            .iter()
            .any(|value| value.as_bytes() == b"gzip")
    }

    /// Whether the status is one of `expected`.
    ///
    /// Any other status is reported to `on_error` as
    /// [`TransportError::UnexpectedStatus`] carrying the decoded error text.
    pub fn expect_status(
        &self,
        expected: &[StatusCode],
        on_error: &mut dyn FnMut(TransportError),
    ) -> bool {
        if expected.contains(&self.status) {
            return true;
        }
        let message = self
            .error_text(&mut |e| debug!(error = %e, "Ignoring undecodable error body"))
            .to_owned();
        debug!(status = %self.status, message = %message, "Unexpected response status");
        on_error(TransportError::UnexpectedStatus {
            status: self.status,
            message,
        });
        false
    }

    /// Whether the response succeeded with `200 OK` or `204 No Content`.
    pub fn is_valid_response(&self, on_error: &mut dyn FnMut(TransportError)) -> bool {
        self.expect_status(&[StatusCode::OK, StatusCode::NO_CONTENT], on_error)
    }

    /// The body decoded as text, or empty if there is none or decoding failed.
    pub fn body_text(&self, on_error: &mut dyn FnMut(DecodeError)) -> &str {
        self.body.text(self.is_gzipped(), on_error)
    }

    /// The error stream decoded as text, or empty if there is none or decoding failed.
    pub fn error_text(&self, on_error: &mut dyn FnMut(DecodeError)) -> &str {
        self.error.text(self.is_gzipped(), on_error)
    }

    /// Take the raw body stream for incremental reading.
    ///
    /// Returns `None` if there is no body or its text was already decoded.
    #[must_use]
    pub fn into_body(self) -> Option<BodyStream> {
        self.body.into_stream()
    }
}

impl fmt::Debug for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseEnvelope")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_present())
            .field("has_error", &self.error.is_present())
            .finish()
    }
}
