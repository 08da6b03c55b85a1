//! Upload body streaming.

use std::fmt;
use std::io::{self, Read};

/// Size of the chunk buffer used to move an upload from its source to the wire.
pub const UPLOAD_BUFFER_SIZE: usize = 4096;

/// Pulls an upload source one fixed-size chunk at a time.
///
/// The transport never asks the source for more than [`UPLOAD_BUFFER_SIZE`]
/// bytes per read, so the whole object is never resident in memory.
pub struct BufferedUpload<R> {
    source: R,
    buf: Box<[u8; UPLOAD_BUFFER_SIZE]>,
    pos: usize,
    filled: usize,
    sent: u64,
}

impl<R: Read> BufferedUpload<R> {
    /// Wrap an upload source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: Box::new([0; UPLOAD_BUFFER_SIZE]),
            pos: 0,
            filled: 0,
            sent: 0,
        }
    }

    /// Bytes handed to the transport so far.
    #[must_use]
    pub fn bytes_sent(&self) -> u64 {
        self.sent
    }
}

impl<R: Read> Read for BufferedUpload<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.filled {
            self.filled = self.source.read(&mut self.buf[..])?;
            self.pos = 0;
            if self.filled == 0 {
                return Ok(0);
            }
        }
        let n = out.len().min(self.filled - self.pos);
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        self.sent += n as u64;
        Ok(n)
    }
}

impl<R> fmt::Debug for BufferedUpload<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedUpload")
            .field("buffered", &(self.filled - self.pos))
            .field("sent", &self.sent)
            .finish_non_exhaustive()
    }
}
