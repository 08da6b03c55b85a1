//! TLS certificate verification policy.

use reqwest::blocking::ClientBuilder;
use tracing::warn;

/// How the transport treats server certificates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Verify certificate chains and host names against the system roots.
    #[default]
    Verified,
    /// Accept server certificates that fail verification: self-signed,
    /// expired, or issued by an unknown authority.
    ///
    /// Maps to the client builder's `danger_accept_invalid_certs`. It exists for
    /// object stores behind self-signed certificates on trusted networks and
    /// must be chosen explicitly.
    InsecureAcceptAll,
}

impl TlsPolicy {
    /// Whether certificate verification is disabled.
    #[must_use]
    pub fn is_insecure(self) -> bool {
        matches!(self, Self::InsecureAcceptAll)
    }

    /// Apply the policy to a client builder before the first connection is made.
    #[must_use]
    pub fn apply(self, builder: ClientBuilder) -> ClientBuilder {
        match self {
            Self::Verified => builder,
            Self::InsecureAcceptAll => {
                warn!("TLS certificate verification is DISABLED for the object store transport");
                builder.danger_accept_invalid_certs(true)
            }
        }
    }
}
