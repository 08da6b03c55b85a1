//! `ListObjectsV2` result projection.

use serde::Serialize;

/// One `<Contents>` entry of a bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    pub key: Option<String>,
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// Entity tag exactly as sent by the server, quotes included.
    pub e_tag: Option<String>,
    pub size: Option<u64>,
    pub storage_class: Option<String>,
}

/// A decoded `<ListBucketResult>` document.
///
/// Counts default to zero when the server omits them, so a listing without
/// `<KeyCount>` is treated as empty by [`BucketListing::keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketListing {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub next_continuation_token: Option<String>,
    pub key_count: i32,
    pub max_keys: i32,
    pub delimiter: Option<String>,
    pub is_truncated: bool,
    pub contents: Vec<ObjectEntry>,
}

impl BucketListing {
    /// Object keys in listing order.
    ///
    /// Returns nothing when `key_count <= 0`, even if `<Contents>` elements are
    /// present: the declared count is authoritative.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        if self.key_count <= 0 {
            return Vec::new();
        }
        self.contents
            .iter()
            .filter_map(|entry| entry.key.clone())
            .collect()
    }

    /// Token for the next page, if the listing is truncated.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        if self.is_truncated {
            self.next_continuation_token.as_deref()
        } else {
            None
        }
    }
}
