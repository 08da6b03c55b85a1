//! Transport and decode error types.

use std::io;
use std::string::FromUtf8Error;

use http::StatusCode;

/// Failures while executing a request or interpreting its status.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request URL could not be built from the base URL and resource path.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A header value contains bytes HTTP does not allow.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Connection, TLS, or protocol failure reported by the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error while moving request or response bytes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The server answered with a status the operation does not accept.
    #[error("unexpected HTTP status {status}: {message}")]
    UnexpectedStatus {
        /// The status code returned by the server.
        status: StatusCode,
        /// Decoded error body, empty if the server sent none.
        message: String,
    },
}

impl TransportError {
    /// The HTTP status carried by an [`TransportError::UnexpectedStatus`] error.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures while turning a response stream into text.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The response declared `Content-Encoding: gzip` but the stream did not inflate.
    #[error("failed to decompress gzip body: {0}")]
    Gzip(#[source] io::Error),

    /// Reading the response stream failed.
    #[error("failed to read response body: {0}")]
    Io(#[source] io::Error),

    /// The (decompressed) body is not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
