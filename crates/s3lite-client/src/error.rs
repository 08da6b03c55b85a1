//! Client error taxonomy.
//!
//! Every failure inside an operation is converted into [`S3ClientError`] and
//! passed to the caller's error handler; operations never return these errors
//! directly.

use s3lite_auth::AuthError;
use s3lite_http::{DecodeError, TransportError};
use s3lite_xml::XmlError;

/// Invalid or missing client configuration. Fatal at construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A mandatory setting was not provided.
    #[error("missing required configuration value: {0}")]
    Missing(&'static str),

    /// The base URL does not parse or is not an `http`/`https` URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP transport could not be built.
    #[error("failed to build HTTP transport: {0}")]
    Transport(#[from] TransportError),
}

/// An identifier that cannot be turned into a resource path segment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The identifier is empty.
    #[error("{kind} name is empty")]
    Empty {
        /// `"bucket"` or `"object"`.
        kind: &'static str,
    },

    /// The identifier is `.` or `..`, which URL resolution would collapse.
    #[error("{kind} name '{value}' is a dot segment")]
    DotSegment {
        /// `"bucket"` or `"object"`.
        kind: &'static str,
        /// The rejected identifier.
        value: String,
    },
}

/// Any failure reported by an [`S3Client`](crate::S3Client) operation.
#[derive(Debug, thiserror::Error)]
pub enum S3ClientError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Identifier encoding error; no request was sent.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Signature computation error.
    #[error(transparent)]
    Signing(#[from] AuthError),

    /// Network failure or non-success status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response text could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Response XML does not match the expected document.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// Copying object data to or from a local stream failed.
    #[error("object data copy failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Stock error handler: log the error and carry on.
pub fn log_error(err: S3ClientError) {
    tracing::warn!(error = %err, "Object store operation failed");
}

/// An error handler that keeps the first reported error.
///
/// Pass `&mut |e| fail_fast.record(e)` to an operation, then turn the outcome
/// into a `Result` with [`FailFast::finish`].
#[derive(Debug, Default)]
pub struct FailFast {
    first: Option<S3ClientError>,
}

impl FailFast {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; only the first one is kept.
    pub fn record(&mut self, err: S3ClientError) {
        if self.first.is_none() {
            self.first = Some(err);
        }
    }

    /// Whether an error was recorded.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.first.is_some()
    }

    /// `Err` with the first recorded error, otherwise `Ok(value)`.
    pub fn finish<T>(self, value: T) -> Result<T, S3ClientError> {
        match self.first {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}
