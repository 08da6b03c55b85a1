//! Signed request construction.

use http::Method;
use s3lite_auth::{AuthError, Sigv2Signer, http_date_now};
use s3lite_http::{TransportError, TransportRequest};

use crate::path::ResourcePath;

/// A request whose `Authorization` header has been computed.
///
/// Built and consumed within one operation; the date and signature are never
/// reused across calls.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP verb.
    pub method: Method,
    /// Content type, empty when the request has no body.
    pub content_type: String,
    /// Value of the `Date` header, also part of the string to sign.
    pub date: String,
    /// Encoded resource path.
    pub resource_path: ResourcePath,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl SignedRequest {
    /// Sign a request dated now.
    pub fn sign(
        signer: &Sigv2Signer,
        method: Method,
        content_type: &str,
        resource_path: ResourcePath,
        on_error: &mut dyn FnMut(AuthError),
    ) -> Self {
        let date = http_date_now();
        Self::sign_at(signer, method, content_type, date, resource_path, on_error)
    }

    /// Sign a request with an explicit `Date` value.
    pub fn sign_at(
        signer: &Sigv2Signer,
        method: Method,
        content_type: &str,
        date: String,
        resource_path: ResourcePath,
        on_error: &mut dyn FnMut(AuthError),
    ) -> Self {
        let authorization = signer.authorization(
            method.as_str(),
            content_type,
            &date,
            resource_path.as_str(),
            on_error,
        );
        Self {
            method,
            content_type: content_type.to_owned(),
            date,
            resource_path,
            authorization,
        }
    }

    /// Turn into a transport request carrying `Date`, `Authorization` and, when
    /// set, `Content-Type`.
    pub fn into_transport_request(self) -> Result<TransportRequest, TransportError> {
        TransportRequest::new(self.method, self.resource_path.as_str())
            .with_signature(&self.date, &self.authorization)?
            .with_content_type(&self.content_type)
    }
}
