//! File zones: named groups of files stored one bucket per zone.
//!
//! [`FileZoneIo`] is the narrow file API hosts program against. [`S3FileZone`]
//! implements it over an [`S3Client`], creating a zone's bucket on first upload.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::client::{ErrorHandler, S3Client};
use crate::config::ClientConfig;
use crate::error::{FailFast, S3ClientError};

/// Chunk size used when copying a downloaded object to its destination.
pub const COPY_BUFFER_SIZE: usize = 9000;

/// Content type attached to every file uploaded to a zone.
pub const FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// File operations on a file zone.
///
/// Like the client, implementations report every failure to `on_error` and
/// return a degraded value instead of an error.
pub trait FileZoneIo {
    /// Names of all files in `zone`; empty when the zone does not exist.
    fn get_all_file_names(&self, zone: &str, on_error: ErrorHandler<'_>) -> Vec<String>;

    /// Store `source` as `name` in `zone`, creating the zone if needed.
    ///
    /// With `length` set, exactly that many bytes are sent with a
    /// `Content-Length` header, which most stores require. Without it the body
    /// is sent chunked.
    fn upload_file(
        &self,
        zone: &str,
        name: &str,
        source: Box<dyn Read + Send>,
        length: Option<u64>,
        on_error: ErrorHandler<'_>,
    ) -> bool;

    /// Remove `name` from `zone`.
    fn delete_file(&self, zone: &str, name: &str, on_error: ErrorHandler<'_>);

    /// Copy `name` from `zone` into `out`.
    ///
    /// Returns `true` once the file was found, even if copying it later failed;
    /// copy failures are reported to `on_error`.
    fn get_file(
        &self,
        zone: &str,
        name: &str,
        out: &mut dyn Write,
        on_error: ErrorHandler<'_>,
    ) -> bool;
}

/// File zones backed by an S3-compatible object store.
#[derive(Debug, Clone)]
pub struct S3FileZone {
    client: S3Client,
}

impl S3FileZone {
    /// Wrap an existing client without contacting the store.
    #[must_use]
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Build a client from `config` and prove it can talk to the store.
    ///
    /// Lists all buckets once; any failure on the way (including a rejected
    /// signature) aborts activation with the first reported error.
    pub fn activate(config: &ClientConfig) -> Result<Self, S3ClientError> {
        let client = S3Client::new(config)?;
        Self::activate_with(client)
    }

    /// Activate over an already built client.
    pub fn activate_with(client: S3Client) -> Result<Self, S3ClientError> {
        let mut fail_fast = FailFast::new();
        let buckets = client.get_all_buckets(&mut |e| fail_fast.record(e));
        fail_fast.finish(())?;
        info!(bucket_list_len = buckets.len(), "File zone store activated");
        Ok(Self::new(client))
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &S3Client {
        &self.client
    }
}

impl FileZoneIo for S3FileZone {
    fn get_all_file_names(&self, zone: &str, on_error: ErrorHandler<'_>) -> Vec<String> {
        self.client.get_object_list(zone, on_error)
    }

    fn upload_file(
        &self,
        zone: &str,
        name: &str,
        source: Box<dyn Read + Send>,
        length: Option<u64>,
        on_error: ErrorHandler<'_>,
    ) -> bool {
        if !self.client.head_bucket(zone, on_error) {
            debug!(zone, "Creating file zone bucket");
            self.client.put_bucket(zone, on_error);
        }
        match length {
            Some(length) => self.client.put_object_sized(
                zone,
                name,
                source,
                length,
                FILE_CONTENT_TYPE,
                on_error,
            ),
            None => self
                .client
                .put_object(zone, name, source, FILE_CONTENT_TYPE, on_error),
        }
    }

    fn delete_file(&self, zone: &str, name: &str, on_error: ErrorHandler<'_>) {
        self.client.delete_object(zone, name, on_error);
    }

    fn get_file(
        &self,
        zone: &str,
        name: &str,
        out: &mut dyn Write,
        on_error: ErrorHandler<'_>,
    ) -> bool {
        let Some(mut stream) = self.client.get_object(zone, name, on_error) else {
            return false;
        };
        match copy_chunked(&mut stream, out) {
            Ok(copied) => debug!(zone, name, copied, "File copied"),
            Err(e) => on_error(e.into()),
        }
        true
    }
}

/// Copy `source` to `out` through a [`COPY_BUFFER_SIZE`] buffer.
fn copy_chunked(source: &mut dyn Read, out: &mut dyn Write) -> std::io::Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut copied = 0u64;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => return Ok(copied),
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        out.write_all(&buf[..n])?;
        copied += n as u64;
    }
}
