//! S3 XML deserialization: parsing S3 response documents into Rust types.
//!
//! This module provides the [`S3Deserialize`] trait and its implementations for the
//! listing and error documents the client reads.

use quick_xml::Reader;
use quick_xml::events::Event;
use s3lite_model::{BucketListing, ObjectEntry, S3ErrorBody};

use crate::error::XmlError;

/// Trait for deserializing S3 types from XML.
///
/// The root element has already been consumed by the caller; the implementation
/// reads child elements until the matching end tag. A self-closing root decodes
/// to `Default::default()`.
pub trait S3Deserialize: Sized + Default {
    /// Name of the document root element this type is decoded from.
    const ROOT_ELEMENT: &'static str;

    /// Deserialize an instance from the given XML reader.
    ///
    /// The reader is positioned just after the opening tag of this element.
    /// The implementation should read all child content and return when
    /// the matching end tag is consumed.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or a value does not parse.
    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError>;
}

/// Deserialize an S3 XML document into a typed value.
///
/// Finds the root element, checks it against [`S3Deserialize::ROOT_ELEMENT`] and
/// delegates to the type's implementation.
///
/// # Errors
///
/// Returns `XmlError` if the XML is malformed, has the wrong root element, or
/// deserialization fails.
pub fn from_xml<T: S3Deserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);

    // Skip the XML declaration and find the root element.
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                check_root::<T>(e.name().as_ref())?;
                return T::deserialize_xml(&mut reader);
            }
            Event::Empty(e) => {
                check_root::<T>(e.name().as_ref())?;
                return Ok(T::default());
            }
            Event::Eof => {
                return Err(XmlError::MissingElement(T::ROOT_ELEMENT.to_owned()));
            }
            // Skip declaration, comments, processing instructions, whitespace.
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

fn check_root<T: S3Deserialize>(raw: &[u8]) -> Result<(), XmlError> {
    let root = utf8_str(raw)?;
    if root == T::ROOT_ELEMENT {
        Ok(())
    } else {
        Err(XmlError::UnexpectedElement(format!(
            "expected root <{}>, found <{root}>",
            T::ROOT_ELEMENT
        )))
    }
}

fn utf8_str(raw: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(raw).map_err(|e| XmlError::ParseError(e.to_string()))
}

/// Read the text content of the current element and consume its end tag.
///
/// Text is not trimmed: keys may legitimately start or end with whitespace.
/// Entity references arrive as separate events and are resolved in place.
fn read_text_content(reader: &mut Reader<&[u8]>) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                text.push_str(utf8_str(&raw)?);
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let entity = e
                        .decode()
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    let resolved = quick_xml::escape::resolve_predefined_entity(&entity)
                        .ok_or_else(|| {
                            XmlError::ParseError(format!("unknown entity reference: &{entity};"))
                        })?;
                    text.push_str(resolved);
                }
            }
            Event::End(_) => {
                return Ok(text);
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Skip over an element and all its children.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Parse a boolean from XML text ("true"/"false").
fn parse_bool(s: &str) -> Result<bool, XmlError> {
    match s.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(XmlError::ParseError(format!("invalid boolean: {s}"))),
    }
}

/// Parse an i32 from XML text.
fn parse_i32(s: &str) -> Result<i32, XmlError> {
    s.trim()
        .parse::<i32>()
        .map_err(|e| XmlError::ParseError(format!("invalid i32 '{s}': {e}")))
}

/// Parse a u64 from XML text.
fn parse_u64(s: &str) -> Result<u64, XmlError> {
    s.trim()
        .parse::<u64>()
        .map_err(|e| XmlError::ParseError(format!("invalid u64 '{s}': {e}")))
}

/// Parse an ISO 8601 timestamp from XML text.
fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, XmlError> {
    let s = s.trim();
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .or_else(|_| {
            // Try parsing the S3 format: 2006-02-03T16:45:09.000Z
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
        })
        .map_err(|e| XmlError::ParseError(format!("invalid timestamp '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// S3Deserialize implementations
// ---------------------------------------------------------------------------

impl S3Deserialize for ObjectEntry {
    const ROOT_ELEMENT: &'static str = "Contents";

    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut entry = ObjectEntry::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match utf8_str(name.as_ref())? {
                        "Key" => entry.key = Some(read_text_content(reader)?),
                        "LastModified" => {
                            entry.last_modified =
                                Some(parse_timestamp(&read_text_content(reader)?)?);
                        }
                        "ETag" => entry.e_tag = Some(read_text_content(reader)?),
                        "Size" => entry.size = Some(parse_u64(&read_text_content(reader)?)?),
                        "StorageClass" => entry.storage_class = Some(read_text_content(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Contents".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(entry)
    }
}

impl S3Deserialize for BucketListing {
    const ROOT_ELEMENT: &'static str = "ListBucketResult";

    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut listing = BucketListing::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match utf8_str(name.as_ref())? {
                        "Name" => listing.name = Some(read_text_content(reader)?),
                        "Prefix" => listing.prefix = Some(read_text_content(reader)?),
                        "NextContinuationToken" => {
                            listing.next_continuation_token = Some(read_text_content(reader)?);
                        }
                        "KeyCount" => listing.key_count = parse_i32(&read_text_content(reader)?)?,
                        "MaxKeys" => listing.max_keys = parse_i32(&read_text_content(reader)?)?,
                        "Delimiter" => listing.delimiter = Some(read_text_content(reader)?),
                        "IsTruncated" => {
                            listing.is_truncated = parse_bool(&read_text_content(reader)?)?;
                        }
                        "Contents" => listing.contents.push(ObjectEntry::deserialize_xml(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in ListBucketResult".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(listing)
    }
}

impl S3Deserialize for S3ErrorBody {
    const ROOT_ELEMENT: &'static str = "Error";

    fn deserialize_xml(reader: &mut Reader<&[u8]>) -> Result<Self, XmlError> {
        let mut body = S3ErrorBody::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match utf8_str(name.as_ref())? {
                        "Code" => body.code = Some(read_text_content(reader)?),
                        "Message" => body.message = Some(read_text_content(reader)?),
                        "Resource" => body.resource = Some(read_text_content(reader)?),
                        "RequestId" => body.request_id = Some(read_text_content(reader)?),
                        _ => skip_element(reader)?,
                    }
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(XmlError::UnexpectedElement(
                        "unexpected EOF in Error".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(body)
    }
}
