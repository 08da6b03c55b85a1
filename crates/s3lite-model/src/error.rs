//! S3 `<Error>` body projection.

use serde::Serialize;

/// Error code returned when the caller already owns the bucket it tried to create.
pub const BUCKET_ALREADY_OWNED_BY_YOU: &str = "BucketAlreadyOwnedByYou";

/// Error code returned when the bucket name is already taken.
pub const BUCKET_ALREADY_EXISTS: &str = "BucketAlreadyExists";

/// A decoded S3 error document.
///
/// S3 uses `noErrorWrapping`, so the body is a flat `<Error>` element:
///
/// ```xml
/// <Error>
///   <Code>NoSuchBucket</Code>
///   <Message>The specified bucket does not exist</Message>
///   <Resource>/mybucket</Resource>
///   <RequestId>tx00000...</RequestId>
/// </Error>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
    pub resource: Option<String>,
    pub request_id: Option<String>,
}

impl S3ErrorBody {
    /// Whether the error reports that the bucket already exists.
    #[must_use]
    pub fn is_bucket_already_exists(&self) -> bool {
        matches!(
            self.code.as_deref(),
            Some(BUCKET_ALREADY_OWNED_BY_YOU | BUCKET_ALREADY_EXISTS)
        )
    }
}
