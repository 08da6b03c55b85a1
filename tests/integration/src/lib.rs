//! Integration tests for s3lite against a live S3-compatible server.
//!
//! These tests require a running server (MinIO or any SigV2-capable store).
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! S3_ENDPOINT_URL=http://localhost:9000 S3_ACCESS_KEY=... S3_SECRET_KEY=... \
//!     cargo test -p s3lite-integration -- --ignored
//! ```

use std::sync::Once;

use s3lite_client::{ClientConfig, S3Client, S3ClientError};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Configuration pointing at the test server.
#[must_use]
pub fn test_config() -> ClientConfig {
    ClientConfig::builder()
        .base_url(env_or("S3_ENDPOINT_URL", "http://localhost:9000"))
        .access_key(env_or("S3_ACCESS_KEY", "minioadmin"))
        .secret_key(env_or("S3_SECRET_KEY", "minioadmin"))
        .build()
}

/// Create a client pointing at the test server.
///
/// # Panics
///
/// Panics if the configuration is invalid.
#[must_use]
pub fn s3_client() -> S3Client {
    init_tracing();
    S3Client::new(&test_config()).expect("valid test configuration")
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
///
/// # Panics
///
/// Panics if the bucket cannot be created.
pub fn create_test_bucket(client: &S3Client, prefix: &str) -> String {
    let bucket = test_bucket_name(prefix);
    assert!(
        client.put_bucket(&bucket, &mut |e| panic!("put_bucket {bucket}: {e}")),
        "put_bucket should succeed"
    );
    bucket
}

/// Delete every object in a bucket. The bucket itself is left for the server's
/// lifecycle, since the client has no bucket deletion.
pub fn cleanup_bucket(client: &S3Client, bucket: &str) {
    let mut on_error = |e: S3ClientError| tracing::warn!(error = %e, bucket, "cleanup failed");
    for key in client.list_all_keys(bucket, &mut on_error) {
        client.delete_object(bucket, &key, &mut on_error);
    }
}

#[cfg(test)]
mod test_bucket;
#[cfg(test)]
mod test_object;
#[cfg(test)]
mod test_zone;
