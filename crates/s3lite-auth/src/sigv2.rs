//! AWS Signature Version 2 signing.
//!
//! SigV2 uses HMAC-SHA1. The `Authorization` header has the format:
//!
//! ```text
//! AWS <AWSAccessKeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))` and:
//!
//! ```text
//! StringToSign = HTTP-Verb + "\n" +
//!                "\n" +
//!                Content-Type + "\n" +
//!                Date + "\n" +
//!                CanonicalizedResource
//! ```
//!
//! The Content-MD5 line is always empty and no `x-amz-*` headers are signed.
//! Requests from this client never carry either, so the canonical form above is
//! exactly what the server reconstructs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::AuthError;

type HmacSha1 = Hmac<Sha1>;

/// Build the SigV2 string to sign.
///
/// ```
/// use s3lite_auth::build_string_to_sign;
///
/// let sts = build_string_to_sign("HEAD", "", "Sat, 28 Feb 2026 12:00:00 GMT", "/photos");
/// assert_eq!(sts, "HEAD\n\n\nSat, 28 Feb 2026 12:00:00 GMT\n/photos");
/// ```
#[must_use]
pub fn build_string_to_sign(
    method: &str,
    content_type: &str,
    date: &str,
    resource_path: &str,
) -> String {
    format!("{method}\n\n{content_type}\n{date}\n{resource_path}")
}

/// Signs requests with a fixed set of credentials.
#[derive(Debug, Clone)]
pub struct Sigv2Signer {
    credentials: Credentials,
}

impl Sigv2Signer {
    /// Create a signer for the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// The credentials this signer uses.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Compute `Base64(HMAC-SHA1(secret, string_to_sign))` for a request.
    pub fn signature(
        &self,
        method: &str,
        content_type: &str,
        date: &str,
        resource_path: &str,
    ) -> Result<String, AuthError> {
        let string_to_sign = build_string_to_sign(method, content_type, date, resource_path);
        debug!(string_to_sign = ?string_to_sign, "Built SigV2 string to sign");
        compute_sigv2_signature(self.credentials.secret_key(), &string_to_sign)
    }

    /// Build the `Authorization` header value: `AWS <access_key>:<signature>`.
    ///
    /// A signing failure is passed to `on_error` and the signature part is left
    /// empty, so the server rejects the request instead of treating it as anonymous.
    pub fn authorization(
        &self,
        method: &str,
        content_type: &str,
        date: &str,
        resource_path: &str,
        on_error: &mut dyn FnMut(AuthError),
    ) -> String {
        let signature = match self.signature(method, content_type, date, resource_path) {
            Ok(sig) => sig,
            Err(e) => {
                warn!(error = %e, "SigV2 signing failed");
                on_error(e);
                String::new()
            }
        };
        format!("AWS {}:{signature}", self.credentials.access_key())
    }
}

fn compute_sigv2_signature(secret_key: &str, string_to_sign: &str) -> Result<String, AuthError> {
    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())?;
    mac.update(string_to_sign.as_bytes());
    let result = mac.finalize().into_bytes();
    Ok(BASE64.encode(result))
}
