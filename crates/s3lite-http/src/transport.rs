//! The transport seam and its blocking `reqwest` implementation.

use std::fmt;
use std::io::Cursor;

use reqwest::Url;
use reqwest::blocking::{Body, Client};
use tracing::debug;

use crate::body::BodyStream;
use crate::error::TransportError;
use crate::request::{ResponseMode, TransportRequest};
use crate::response::ResponseEnvelope;
use crate::tls::TlsPolicy;

/// Executes one request and returns the completed response.
///
/// Implementations block the calling thread until response headers arrive (and,
/// in [`ResponseMode::Buffered`], until the whole body has been read). Any
/// status code is a successful round trip; status interpretation belongs to the
/// caller.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send `request` and wait for the response.
    fn execute(&self, request: TransportRequest) -> Result<ResponseEnvelope, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`.
///
/// Resource paths are absolute, so they replace any path on the base URL:
/// `/photos` against `https://store.example/minio` targets
/// `https://store.example/photos`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
    tls: TlsPolicy,
}

impl HttpTransport {
    /// Build a transport for `base_url` with the given TLS policy.
    pub fn new(base_url: Url, tls: TlsPolicy) -> Result<Self, TransportError> {
        let client = tls.apply(Client::builder()).build()?;
        Ok(Self {
            base_url,
            client,
            tls,
        })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The TLS policy the client was built with.
    #[must_use]
    pub fn tls(&self) -> TlsPolicy {
        self.tls
    }

    fn request_url(&self, request: &TransportRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", request.path)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: TransportRequest) -> Result<ResponseEnvelope, TransportError> {
        let url = self.request_url(&request)?;
        debug!(method = %request.method, url = %url, mode = ?request.mode, "Sending request");

        let TransportRequest {
            method,
            headers,
            body,
            mode,
            ..
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            let body = match body.into_parts() {
                (reader, Some(length)) => Body::sized(reader, length),
                (reader, None) => Body::new(reader),
            };
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        debug!(status = %status, "Received response");

        let stream: BodyStream = match mode {
            ResponseMode::Streaming => Box::new(response),
            ResponseMode::Buffered => Box::new(Cursor::new(response.bytes()?)),
        };

        let (body, error) = if status.is_client_error() || status.is_server_error() {
            (None, Some(stream))
        } else {
            (Some(stream), None)
        };
        Ok(ResponseEnvelope::new(status, headers, body, error))
    }
}
