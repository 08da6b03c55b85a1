//! Resource path construction.
//!
//! A resource path is both the literal request path and the
//! `CanonicalizedResource` of the SigV2 string to sign, so it must be built
//! exactly once per request and reused for both.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::EncodingError;

/// Characters kept verbatim in a path segment: the RFC 3986 unreserved set
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`). Everything else, `/` included, is
/// percent-encoded from its UTF-8 bytes.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `/`, `/{bucket}` or `/{bucket}/{object}` with percent-encoded identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// The service root, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// `/{bucket}`.
    pub fn bucket(bucket: &str) -> Result<Self, EncodingError> {
        Ok(Self(format!("/{}", encode_segment("bucket", bucket)?)))
    }

    /// `/{bucket}/{object}`.
    pub fn object(bucket: &str, object: &str) -> Result<Self, EncodingError> {
        Ok(Self(format!(
            "/{}/{}",
            encode_segment("bucket", bucket)?,
            encode_segment("object", object)?
        )))
    }

    /// The encoded path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn encode_segment(kind: &'static str, value: &str) -> Result<String, EncodingError> {
    match value {
        "" => Err(EncodingError::Empty { kind }),
        "." | ".." => Err(EncodingError::DotSegment {
            kind,
            value: value.to_owned(),
        }),
        _ => Ok(utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET).to_string()),
    }
}
