//! Client configuration.
//!
//! Provides [`ClientConfig`], the validated-once input to [`S3Client`](crate::S3Client).
//! Values come from the hosting environment, typically environment variables via
//! [`ClientConfig::from_env`]. Base URL, access key, and secret key are mandatory;
//! a missing or malformed value is a fatal [`ConfigError`].

use std::fmt;

use reqwest::Url;
use s3lite_auth::Credentials;
use s3lite_http::TlsPolicy;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::ConfigError;

/// Environment variable holding the object store base URL.
pub const ENV_BASE_URL: &str = "S3LITE_BASE_URL";
/// Environment variable holding the access key.
pub const ENV_ACCESS_KEY: &str = "S3LITE_ACCESS_KEY";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "S3LITE_SECRET_KEY";
/// Environment variable that disables TLS certificate verification.
pub const ENV_INSECURE_TLS: &str = "S3LITE_INSECURE_TLS";
/// Environment variable holding the log filter.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Object store client configuration.
///
/// # Examples
///
/// ```
/// use s3lite_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://store.example/minio/")
///     .access_key("AK")
///     .secret_key("SK")
///     .build();
/// assert_eq!(config.base_url().unwrap().as_str(), "https://store.example/minio");
/// assert!(!config.insecure_tls);
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the object store, e.g. `https://myapp.com/minio`.
    #[builder(setter(into))]
    pub base_url: String,

    /// Access key id.
    #[builder(setter(into))]
    pub access_key: String,

    /// Secret key. Never serialized.
    #[builder(setter(into))]
    #[serde(skip_serializing, default)]
    pub secret_key: String,

    /// Accept any TLS certificate. Off unless explicitly enabled.
    #[builder(default = false)]
    #[serde(default)]
    pub insecure_tls: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"), setter(into))]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    String::from("info")
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `S3LITE_BASE_URL` | *(required)* |
    /// | `S3LITE_ACCESS_KEY` | *(required)* |
    /// | `S3LITE_SECRET_KEY` | *(required)* |
    /// | `S3LITE_INSECURE_TLS` | `false` |
    /// | `LOG_LEVEL` | `info` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary key lookup, using the variable names
    /// of [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let config = Self {
            base_url: required(ENV_BASE_URL)?,
            access_key: required(ENV_ACCESS_KEY)?,
            secret_key: required(ENV_SECRET_KEY)?,
            insecure_tls: lookup(ENV_INSECURE_TLS).is_some_and(|v| parse_bool(&v)),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(default_log_level),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every mandatory value is present and the base URL is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.access_key.is_empty() {
            return Err(ConfigError::Missing(ENV_ACCESS_KEY));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::Missing(ENV_SECRET_KEY));
        }
        Ok(())
    }

    /// The parsed base URL with any trailing slash removed.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Missing(ENV_BASE_URL));
        }
        let trimmed = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_owned()));
        }
        Ok(url)
    }

    /// Signing credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.access_key.clone(), self.secret_key.clone())
    }

    /// The TLS policy for the transport.
    #[must_use]
    pub fn tls_policy(&self) -> TlsPolicy {
        if self.insecure_tls {
            TlsPolicy::InsecureAcceptAll
        } else {
            TlsPolicy::Verified
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("insecure_tls", &self.insecure_tls)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    const COMPLETE: &[(&str, &str)] = &[
        (ENV_BASE_URL, "https://store.example/minio/"),
        (ENV_ACCESS_KEY, "AK"),
        (ENV_SECRET_KEY, "SK"),
    ];

    #[test]
    fn test_should_load_complete_config() {
        let config = ClientConfig::from_lookup(lookup(COMPLETE)).unwrap();
        assert_eq!(config.access_key, "AK");
        assert_eq!(config.secret_key, "SK");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tls_policy(), TlsPolicy::Verified);
    }

    #[test]
    fn test_should_strip_trailing_slash_from_base_url() {
        let config = ClientConfig::from_lookup(lookup(COMPLETE)).unwrap();
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://store.example/minio"
        );
    }

    #[test]
    fn test_should_fail_on_each_missing_value() {
        for missing in [ENV_BASE_URL, ENV_ACCESS_KEY, ENV_SECRET_KEY] {
            let pairs: Vec<_> = COMPLETE
                .iter()
                .copied()
                .filter(|(k, _)| *k != missing)
                .collect();
            let err = ClientConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Missing(name) if name == missing),
                "expected missing {missing}, got {err}"
            );
        }
    }

    #[test]
    fn test_should_treat_empty_value_as_missing() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://store.example"),
            (ENV_ACCESS_KEY, ""),
            (ENV_SECRET_KEY, "SK"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_ACCESS_KEY)));
    }

    #[test]
    fn test_should_reject_non_http_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "ftp://store.example"),
            (ENV_ACCESS_KEY, "AK"),
            (ENV_SECRET_KEY, "SK"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_should_reject_unparseable_base_url() {
        let config = ClientConfig::builder()
            .base_url("not a url")
            .access_key("AK")
            .secret_key("SK")
            .build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_should_enable_insecure_tls_only_when_asked() {
        let mut pairs = COMPLETE.to_vec();
        pairs.push((ENV_INSECURE_TLS, "TRUE"));
        let config = ClientConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.tls_policy(), TlsPolicy::InsecureAcceptAll);
    }

    #[test]
    fn test_should_redact_secret_key() {
        let config = ClientConfig::from_lookup(lookup(COMPLETE)).unwrap();
        assert!(!format!("{config:?}").contains("\"SK\""));
    }
}
