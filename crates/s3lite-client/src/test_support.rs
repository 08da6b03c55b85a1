//! In-memory transports for dispatcher tests.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{Cursor, Read};
use std::sync::Arc;

use http::header::HeaderName;
use http::{HeaderMap, Method, StatusCode};
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
use s3lite_http::{ResponseEnvelope, ResponseMode, Transport, TransportError, TransportRequest};

/// What a stub transport saw of one request, body included.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub body_length: Option<u64>,
    pub mode: ResponseMode,
}

impl RecordedRequest {
    fn record(request: TransportRequest) -> Self {
        let (body, body_length) = match request.body {
            Some(body) => {
                let (mut reader, length) = body.into_parts();
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).unwrap();
                (Some(bytes), length)
            }
            None => (None, None),
        };
        Self {
            method: request.method,
            path: request.path,
            query: request.query,
            headers: request.headers,
            body,
            body_length,
            mode: request.mode,
        }
    }

    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Build an envelope the way the HTTP transport does: error statuses put the
/// payload on the error stream.
pub(crate) fn envelope(status: StatusCode, payload: &[u8]) -> ResponseEnvelope {
    let stream: s3lite_http::BodyStream = Box::new(Cursor::new(payload.to_vec()));
    if status.is_client_error() || status.is_server_error() {
        ResponseEnvelope::new(status, HeaderMap::new(), None, Some(stream))
    } else {
        ResponseEnvelope::new(status, HeaderMap::new(), Some(stream), None)
    }
}

type Responder =
    Box<dyn Fn(&RecordedRequest) -> Result<ResponseEnvelope, TransportError> + Send + Sync>;

/// Records every request and answers with a fixed responder.
pub(crate) struct StubTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responder: Responder,
}

impl StubTransport {
    pub fn new(
        responder: impl Fn(&RecordedRequest) -> Result<ResponseEnvelope, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Answer every request with `status` and an empty payload.
    pub fn status(status: StatusCode) -> Arc<Self> {
        Self::body(status, "")
    }

    /// Answer every request with `status` and `payload`.
    pub fn body(status: StatusCode, payload: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(envelope(status, payload.as_bytes())))
    }

    /// Fail every request before a response arrives.
    pub fn failing() -> Arc<Self> {
        Self::new(|_| {
            Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl fmt::Debug for StubTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubTransport")
            .field("requests", &self.requests.lock().len())
            .finish_non_exhaustive()
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: TransportRequest) -> Result<ResponseEnvelope, TransportError> {
        let recorded = RecordedRequest::record(request);
        let response = (self.responder)(&recorded);
        self.requests.lock().push(recorded);
        response
    }
}

/// A tiny object store that keeps buckets and objects in memory.
#[derive(Debug, Default)]
pub(crate) struct EchoStore {
    buckets: Mutex<BTreeMap<String, Vec<(String, Vec<u8>)>>>,
}

impl EchoStore {
    pub fn with_buckets(names: &[&str]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut buckets = store.buckets.lock();
            for name in names {
                buckets.insert((*name).to_owned(), Vec::new());
            }
        }
        Arc::new(store)
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let buckets = self.buckets.lock();
        buckets
            .get(bucket)?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, data)| data.clone())
    }

    fn answer(&self, request: &RecordedRequest) -> ResponseEnvelope {
        let segments: Vec<String> = request
            .path
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let mut buckets = self.buckets.lock();

        match (&request.method, segments.as_slice()) {
            (&Method::GET, []) => {
                let names: String = buckets
                    .keys()
                    .map(|name| format!("<Bucket><Name>{name}</Name></Bucket>"))
                    .collect();
                let xml = format!("<ListAllMyBucketsResult><Buckets>{names}</Buckets></ListAllMyBucketsResult>");
                envelope(StatusCode::OK, xml.as_bytes())
            }
            (&Method::HEAD, [bucket]) if buckets.contains_key(bucket) => {
                envelope(StatusCode::OK, b"")
            }
            (&Method::PUT, [bucket]) => {
                if buckets.contains_key(bucket) {
                    return error(StatusCode::CONFLICT, "BucketAlreadyOwnedByYou");
                }
                buckets.insert(bucket.clone(), Vec::new());
                envelope(StatusCode::OK, b"")
            }
            (&Method::GET, [bucket]) => match buckets.get(bucket) {
                Some(objects) => {
                    let contents: String = objects
                        .iter()
                        .map(|(key, data)| {
                            format!("<Contents><Key>{key}</Key><Size>{}</Size></Contents>", data.len())
                        })
                        .collect();
                    let xml = format!(
                        "<ListBucketResult><Name>{bucket}</Name><KeyCount>{}</KeyCount>\
                         <IsTruncated>false</IsTruncated>{contents}</ListBucketResult>",
                        objects.len()
                    );
                    envelope(StatusCode::OK, xml.as_bytes())
                }
                None => error(StatusCode::NOT_FOUND, "NoSuchBucket"),
            },
            (&Method::PUT, [bucket, key]) => match buckets.get_mut(bucket) {
                Some(objects) => {
                    let data = request.body.clone().unwrap_or_default();
                    objects.retain(|(k, _)| k != key);
                    objects.push((key.clone(), data));
                    envelope(StatusCode::OK, b"")
                }
                None => error(StatusCode::NOT_FOUND, "NoSuchBucket"),
            },
            (&Method::GET, [bucket, key]) => {
                match buckets.get(bucket).and_then(|o| o.iter().find(|(k, _)| k == key)) {
                    Some((_, data)) => envelope(StatusCode::OK, data),
                    None => error(StatusCode::NOT_FOUND, "NoSuchKey"),
                }
            }
            (&Method::DELETE, [bucket, key]) => {
                if let Some(objects) = buckets.get_mut(bucket) {
                    objects.retain(|(k, _)| k != key);
                }
                envelope(StatusCode::NO_CONTENT, b"")
            }
            _ => error(StatusCode::NOT_FOUND, "NoSuchBucket"),
        }
    }
}

impl Transport for EchoStore {
    fn execute(&self, request: TransportRequest) -> Result<ResponseEnvelope, TransportError> {
        Ok(self.answer(&RecordedRequest::record(request)))
    }
}

fn error(status: StatusCode, code: &str) -> ResponseEnvelope {
    let xml = format!("<Error><Code>{code}</Code></Error>");
    envelope(status, xml.as_bytes())
}
