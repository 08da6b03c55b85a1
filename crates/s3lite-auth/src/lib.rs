//! AWS Signature Version 2 request signing for s3lite.
//!
//! This crate produces the `Authorization` and `Date` header values for requests sent
//! to an S3-compatible object store using the legacy SigV2 (HMAC-SHA1) scheme.
//!
//! # Usage
//!
//! ```rust
//! use s3lite_auth::{Credentials, Sigv2Signer};
//!
//! let signer = Sigv2Signer::new(Credentials::new("AK", "SK"));
//! let date = "Sat, 28 Feb 2026 12:00:00 GMT";
//! let header = signer.authorization("HEAD", "", date, "/photos", &mut |_| {});
//! assert!(header.starts_with("AWS AK:"));
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Access/secret key pair
//! - [`date`] - RFC 1123 `Date` header formatting
//! - [`error`] - Signing error types
//! - [`sigv2`] - String-to-sign construction and HMAC-SHA1 signatures

pub mod credentials;
pub mod date;
pub mod error;
pub mod sigv2;

pub use credentials::Credentials;
pub use date::{format_http_date, http_date_now};
pub use error::AuthError;
pub use sigv2::{Sigv2Signer, build_string_to_sign};
