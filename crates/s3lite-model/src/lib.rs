//! Read-only projections of the S3 XML documents consumed by s3lite.
//!
//! - [`BucketListing`] / [`ObjectEntry`]: the `ListBucketResult` body of a
//!   `ListObjectsV2` response.
//! - [`S3ErrorBody`]: the flat `<Error>` body S3 returns with non-success statuses.
#![allow(missing_docs)]

pub mod error;
pub mod listing;

pub use error::S3ErrorBody;
pub use listing::{BucketListing, ObjectEntry};
