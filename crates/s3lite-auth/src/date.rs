//! `Date` header formatting.
//!
//! The signed date must be byte-identical to the header value sent on the wire,
//! so it is always rendered in UTC with English day and month names.

use chrono::{DateTime, Utc};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an RFC 1123 HTTP date, e.g. `Sat, 28 Feb 2026 12:00:00 GMT`.
#[must_use]
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// The current time as an RFC 1123 HTTP date.
#[must_use]
pub fn http_date_now() -> String {
    format_http_date(Utc::now())
}
