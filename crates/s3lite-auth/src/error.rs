//! Signing error types.

/// Errors raised while computing a request signature.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The HMAC could not be keyed with the configured secret.
    #[error("invalid HMAC-SHA1 signing key: {0}")]
    InvalidKey(#[from] digest::InvalidLength),
}
