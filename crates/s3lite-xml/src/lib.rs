//! S3 XML decoding for s3lite.
//!
//! Converts the XML bodies returned by an S3-compatible server into the typed
//! projections of `s3lite-model`. Decoding is explicit: each type walks the
//! quick-xml event stream for the elements it knows and skips the rest.
//!
//! # Key components
//!
//! - [`S3Deserialize`] trait and [`from_xml`] function for parsing a document into a struct
//! - [`XmlError`] for malformed or non-conforming documents
//!
//! # S3 XML conventions
//!
//! - Booleans: lowercase `true`/`false`
//! - Timestamps: ISO 8601 format (`2006-02-03T16:45:09.000Z`)
//! - Entity tags arrive entity-escaped (`&quot;...&quot;`)

pub mod deserialize;
pub mod error;

pub use deserialize::{S3Deserialize, from_xml};
pub use error::XmlError;
