//! Blocking HTTP plumbing for s3lite.
//!
//! This crate carries one request to an S3-compatible server and wraps what comes
//! back:
//!
//! - [`request::TransportRequest`]: method, resource path, query, headers and an
//!   optional streaming body.
//! - [`transport::Transport`]: the seam the client calls through, with
//!   [`transport::HttpTransport`] as the `reqwest` implementation.
//! - [`tls::TlsPolicy`]: certificate verification policy for the transport.
//! - [`response::ResponseEnvelope`]: status, headers and body/error streams, with
//!   text decoded lazily (gzip aware) and cached once per envelope.

pub mod body;
pub mod error;
pub mod request;
pub mod response;
pub mod tls;
pub mod transport;

pub use body::{BodyStream, RequestBody};
pub use error::{DecodeError, TransportError};
pub use request::{ResponseMode, TransportRequest};
pub use response::ResponseEnvelope;
pub use tls::TlsPolicy;
pub use transport::{HttpTransport, Transport};
