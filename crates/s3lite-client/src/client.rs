//! The request dispatcher.
//!
//! [`S3Client`] exposes one synchronous method per object store operation. Each
//! call builds its resource path, signs a fresh request, sends it through the
//! [`Transport`] and interprets the response. Nothing is returned as an error:
//! every failure goes to the caller's `on_error` handler and the operation
//! returns its degraded value (`false`, empty text, an empty list, `None`).

use std::collections::HashSet;
use std::io::Read;
use std::sync::Arc;

use http::{Method, StatusCode};
use s3lite_auth::{Credentials, Sigv2Signer};
use s3lite_http::{
    BodyStream, HttpTransport, RequestBody, ResponseEnvelope, Transport, TransportError,
    TransportRequest,
};
use s3lite_model::{BucketListing, S3ErrorBody};
use s3lite_xml::from_xml;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ConfigError, EncodingError, S3ClientError};
use crate::path::ResourcePath;
use crate::request::SignedRequest;
use crate::upload::BufferedUpload;

/// Query parameter selecting the `ListObjectsV2` API.
const LIST_TYPE: (&str, &str) = ("list-type", "2");
/// Query parameter carrying a listing continuation token.
const CONTINUATION_TOKEN: &str = "continuation-token";
/// `Accept` value for requests answered with an XML document.
const XML_CONTENT_TYPE: &str = "application/xml";

/// Error handler taken by every operation.
pub type ErrorHandler<'a> = &'a mut dyn FnMut(S3ClientError);

/// Blocking client for an S3-compatible object store.
///
/// The client is immutable after construction and `Send + Sync`; independent
/// threads may share it behind an `Arc` and call operations concurrently.
#[derive(Debug, Clone)]
pub struct S3Client {
    signer: Sigv2Signer,
    transport: Arc<dyn Transport>,
}

impl S3Client {
    /// Build a client over HTTP from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_url = config.base_url()?;
        let transport = HttpTransport::new(base_url, config.tls_policy())?;
        info!(
            base_url = %transport.base_url(),
            access_key = %config.access_key,
            insecure_tls = transport.tls().is_insecure(),
            "Object store client created"
        );
        Ok(Self::with_transport(config.credentials(), Arc::new(transport)))
    }

    /// Build a client over an arbitrary transport.
    #[must_use]
    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            signer: Sigv2Signer::new(credentials),
            transport,
        }
    }

    /// Whether `bucket` exists and is accessible.
    ///
    /// A non-`200` answer is an ordinary "no" and is not reported; only
    /// encoding, signing and transport failures reach `on_error`.
    pub fn head_bucket(&self, bucket: &str, on_error: ErrorHandler<'_>) -> bool {
        let Some(path) = resolve(ResourcePath::bucket(bucket), on_error) else {
            return false;
        };
        let Some(response) = self.dispatch(Method::HEAD, "", path, Ok, on_error) else {
            return false;
        };
        response.expect_status(&[StatusCode::OK], &mut |e| {
            debug!(bucket, error = %e, "Bucket not available");
        })
    }

    /// The raw `ListAllMyBucketsResult` document, or empty text on failure.
    pub fn get_all_buckets(&self, on_error: ErrorHandler<'_>) -> String {
        let Some(response) =
            self.dispatch(Method::GET, "", ResourcePath::root(), accept_xml, on_error)
        else {
            return String::new();
        };
        if !response.is_valid_response(&mut |e| on_error(e.into())) {
            return String::new();
        }
        response.body_text(&mut |e| on_error(e.into())).to_owned()
    }

    /// Create `bucket`.
    ///
    /// A `409 Conflict` whose error code says the bucket already exists counts
    /// as success, so concurrent creators of the same bucket all succeed.
    pub fn put_bucket(&self, bucket: &str, on_error: ErrorHandler<'_>) -> bool {
        let Some(path) = resolve(ResourcePath::bucket(bucket), on_error) else {
            return false;
        };
        let Some(response) = self.dispatch(Method::PUT, "", path, Ok, on_error) else {
            return false;
        };

        if response.status() == StatusCode::CONFLICT && already_exists(&response) {
            info!(bucket, "Bucket already exists");
            return true;
        }
        let created = response.is_valid_response(&mut |e| on_error(e.into()));
        if created {
            info!(bucket, "Bucket created");
        }
        created
    }

    /// Keys of the first listing page of `bucket`, in server order.
    ///
    /// Empty on any failure, and whenever the listing declares `KeyCount <= 0`.
    pub fn get_object_list(&self, bucket: &str, on_error: ErrorHandler<'_>) -> Vec<String> {
        self.list_objects(bucket, None, on_error)
            .map(|listing| listing.keys())
            .unwrap_or_default()
    }

    /// One `ListObjectsV2` page of `bucket`, starting at `continuation_token`.
    pub fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
        on_error: ErrorHandler<'_>,
    ) -> Option<BucketListing> {
        let path = resolve(ResourcePath::bucket(bucket), on_error)?;
        let response = self.dispatch(
            Method::GET,
            "",
            path,
            |request| {
                let request = request.with_query(LIST_TYPE.0, LIST_TYPE.1);
                let request = match continuation_token {
                    Some(token) => request.with_query(CONTINUATION_TOKEN, token),
                    None => request,
                };
                accept_xml(request)
            },
            on_error,
        )?;
        if !response.is_valid_response(&mut |e| on_error(e.into())) {
            return None;
        }

        let mut decoded = true;
        let text = response.body_text(&mut |e| {
            decoded = false;
            on_error(e.into());
        });
        if !decoded {
            return None;
        }

        match from_xml::<BucketListing>(text.as_bytes()) {
            Ok(listing) => {
                debug!(
                    bucket,
                    key_count = listing.key_count,
                    truncated = listing.is_truncated,
                    "Listed objects"
                );
                Some(listing)
            }
            Err(e) => {
                warn!(bucket, error = %e, "Malformed bucket listing");
                on_error(e.into());
                None
            }
        }
    }

    /// Every key of `bucket`, following continuation tokens across pages.
    ///
    /// Stops at the first failed page, keeping the keys gathered so far. A page
    /// that is truncated but carries no token, or repeats a token, ends the walk.
    pub fn list_all_keys(&self, bucket: &str, on_error: ErrorHandler<'_>) -> Vec<String> {
        let mut keys = Vec::new();
        let mut seen = HashSet::new();
        let mut token: Option<String> = None;

        loop {
            let Some(listing) = self.list_objects(bucket, token.as_deref(), on_error) else {
                break;
            };
            keys.extend(listing.keys());

            match listing.continuation() {
                Some(next) if seen.insert(next.to_owned()) => token = Some(next.to_owned()),
                Some(next) => {
                    warn!(bucket, token = next, "Continuation token repeated, stopping listing");
                    break;
                }
                None => {
                    if listing.is_truncated {
                        warn!(bucket, "Truncated listing without continuation token");
                    }
                    break;
                }
            }
        }
        keys
    }

    /// Open `object` in `bucket` for reading.
    ///
    /// The returned stream reads straight from the connection; the object is
    /// never buffered. `None` unless the server answers `200 OK`.
    pub fn get_object(
        &self,
        bucket: &str,
        object: &str,
        on_error: ErrorHandler<'_>,
    ) -> Option<BodyStream> {
        let path = resolve(ResourcePath::object(bucket, object), on_error)?;
        let response = self.dispatch(
            Method::GET,
            "",
            path,
            |request| Ok(request.streaming()),
            on_error,
        )?;
        if !response.expect_status(&[StatusCode::OK], &mut |e| on_error(e.into())) {
            return None;
        }
        response.into_body()
    }

    /// Upload `source` as `object` in `bucket` with chunked transfer encoding.
    ///
    /// AWS S3 and MinIO refuse uploads without `Content-Length`; prefer
    /// [`S3Client::put_object_sized`] whenever the length is known.
    pub fn put_object(
        &self,
        bucket: &str,
        object: &str,
        source: impl Read + Send + 'static,
        content_type: &str,
        on_error: ErrorHandler<'_>,
    ) -> bool {
        let body = RequestBody::streaming(BufferedUpload::new(source));
        self.upload(bucket, object, body, content_type, on_error)
    }

    /// Upload exactly `length` bytes of `source` with a `Content-Length` header.
    pub fn put_object_sized(
        &self,
        bucket: &str,
        object: &str,
        source: impl Read + Send + 'static,
        length: u64,
        content_type: &str,
        on_error: ErrorHandler<'_>,
    ) -> bool {
        let body = RequestBody::sized(BufferedUpload::new(source.take(length)), length);
        self.upload(bucket, object, body, content_type, on_error)
    }

    /// Delete `object` from `bucket`.
    ///
    /// The delete is always sent, whether or not the object exists; anything
    /// but `204 No Content` is reported.
    pub fn delete_object(&self, bucket: &str, object: &str, on_error: ErrorHandler<'_>) {
        let Some(path) = resolve(ResourcePath::object(bucket, object), on_error) else {
            return;
        };
        if let Some(response) = self.dispatch(Method::DELETE, "", path, Ok, on_error) {
            if response.expect_status(&[StatusCode::NO_CONTENT], &mut |e| on_error(e.into())) {
                debug!(bucket, object, "Object deleted");
            }
        }
    }

    fn upload(
        &self,
        bucket: &str,
        object: &str,
        body: RequestBody,
        content_type: &str,
        on_error: ErrorHandler<'_>,
    ) -> bool {
        let Some(path) = resolve(ResourcePath::object(bucket, object), on_error) else {
            return false;
        };
        let length = body.length();
        let Some(response) = self.dispatch(
            Method::PUT,
            content_type,
            path,
            |request| Ok(request.with_body(body)),
            on_error,
        ) else {
            return false;
        };
        let stored = response.is_valid_response(&mut |e| on_error(e.into()));
        if stored {
            debug!(bucket, object, length = ?length, "Object stored");
        }
        stored
    }

    /// Sign, send and return the response, or report and return `None`.
    fn dispatch(
        &self,
        method: Method,
        content_type: &str,
        path: ResourcePath,
        prepare: impl FnOnce(TransportRequest) -> Result<TransportRequest, TransportError>,
        on_error: ErrorHandler<'_>,
    ) -> Option<ResponseEnvelope> {
        let signed =
            SignedRequest::sign(&self.signer, method, content_type, path, &mut |e| {
                on_error(e.into());
            });
        let method = signed.method.clone();
        let path = signed.resource_path.clone();

        let request = match signed.into_transport_request().and_then(prepare) {
            Ok(request) => request,
            Err(e) => {
                on_error(e.into());
                return None;
            }
        };
        match self.transport.execute(request) {
            Ok(response) => {
                debug!(%method, %path, status = %response.status(), "Request completed");
                Some(response)
            }
            Err(e) => {
                warn!(%method, %path, error = %e, "Request failed");
                on_error(e.into());
                None
            }
        }
    }
}

fn resolve(
    path: Result<ResourcePath, EncodingError>,
    on_error: ErrorHandler<'_>,
) -> Option<ResourcePath> {
    path.map_err(|e| {
        warn!(error = %e, "Cannot build resource path");
        on_error(e.into());
    })
    .ok()
}

fn accept_xml(request: TransportRequest) -> Result<TransportRequest, TransportError> {
    request.with_accept(XML_CONTENT_TYPE)
}

fn already_exists(response: &ResponseEnvelope) -> bool {
    let text = response.error_text(&mut |e| debug!(error = %e, "Undecodable conflict body"));
    from_xml::<S3ErrorBody>(text.as_bytes()).is_ok_and(|body| body.is_bucket_already_exists())
}
