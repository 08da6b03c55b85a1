//! Request and response body types.
//!
//! Bodies are plain blocking readers: request bodies are pulled by the transport
//! as it writes to the socket, and response bodies are read by whoever owns the
//! envelope. Neither side holds a whole object in memory.

use std::fmt;
use std::io::Read;

use flate2::read::GzDecoder;

use crate::error::DecodeError;

/// A response byte stream.
pub type BodyStream = Box<dyn Read + Send>;

/// Separator placed between decoded lines of response text.
pub const LINE_SEPARATOR: &str = "\n";

/// A streaming request body with an optional declared length.
pub struct RequestBody {
    reader: Box<dyn Read + Send>,
    length: Option<u64>,
}

impl RequestBody {
    /// A body of unknown length, sent with chunked transfer encoding.
    #[must_use]
    pub fn streaming(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            length: None,
        }
    }

    /// A body of known length, sent with `Content-Length`.
    #[must_use]
    pub fn sized(reader: impl Read + Send + 'static, length: u64) -> Self {
        Self {
            reader: Box::new(reader),
            length: Some(length),
        }
    }

    /// The declared length, if any.
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    /// Split into the reader and declared length.
    #[must_use]
    pub fn into_parts(self) -> (Box<dyn Read + Send>, Option<u64>) {
        (self.reader, self.length)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBody")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Read a response stream to text.
///
/// A gzip stream is inflated before UTF-8 decoding. The text is the decoded
/// lines joined with [`LINE_SEPARATOR`]; `\r\n` endings and a trailing newline
/// do not survive.
pub fn decode_text(stream: BodyStream, gzipped: bool) -> Result<String, DecodeError> {
    let mut bytes = Vec::new();
    if gzipped {
        GzDecoder::new(stream)
            .read_to_end(&mut bytes)
            .map_err(DecodeError::Gzip)?;
    } else {
        let mut stream = stream;
        stream.read_to_end(&mut bytes).map_err(DecodeError::Io)?;
    }

    let text = String::from_utf8(bytes)?;
    Ok(text.lines().collect::<Vec<_>>().join(LINE_SEPARATOR))
}
