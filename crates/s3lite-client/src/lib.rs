//! Minimal blocking client for S3-compatible object stores.
//!
//! Requests are signed with AWS Signature Version 2 and sent through a
//! [`Transport`](s3lite_http::Transport). Operations never return errors: each
//! takes an `on_error` handler that receives every [`S3ClientError`], and the
//! operation returns a degraded value (`false`, empty text, an empty list or
//! `None`). Use [`log_error`] to log and continue, or [`FailFast`] to turn the
//! first error into a `Result`.
//!
//! ```no_run
//! use s3lite_client::{ClientConfig, S3Client, log_error};
//!
//! let config = ClientConfig::from_env()?;
//! let client = S3Client::new(&config)?;
//! if client.head_bucket("photos", &mut log_error) {
//!     for key in client.get_object_list("photos", &mut log_error) {
//!         println!("{key}");
//!     }
//! }
//! # Ok::<(), s3lite_client::ConfigError>(())
//! ```
//!
//! [`FileZoneIo`] and [`S3FileZone`] layer a small file API on top, mapping each
//! file zone to one bucket.

pub mod client;
pub mod config;
pub mod error;
pub mod path;
pub mod request;
pub mod upload;
pub mod zone;

#[cfg(test)]
mod test_support;

pub use client::{ErrorHandler, S3Client};
pub use config::ClientConfig;
pub use error::{ConfigError, EncodingError, FailFast, S3ClientError, log_error};
pub use path::ResourcePath;
pub use request::SignedRequest;
pub use upload::{BufferedUpload, UPLOAD_BUFFER_SIZE};
pub use zone::{FileZoneIo, S3FileZone};

pub use s3lite_auth::Credentials;
pub use s3lite_http::{BodyStream, TlsPolicy, Transport};
pub use s3lite_model::{BucketListing, ObjectEntry};
