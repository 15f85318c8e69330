//! Request body construction and serializer strategies.
//!
//! [`format_body`] turns a classified value into a [`Payload`]:
//!
//! 1. a value that already is a payload is used unchanged;
//! 2. a plain string becomes the body text as-is (it is treated as already
//!    serialized);
//! 3. anything else goes through the pluggable [`BodyFormatter`] strategy.
//!
//! Unlike the key-value formatter, serialization here is full depth: nested
//! composites, maps, and sequences are expanded recursively by serde.

use std::fmt;

use bytes::Bytes;

use crate::Result;
use crate::value::{IntoValue, Scalar, Value, ValueKind};

// ============================================================================
// Charset
// ============================================================================

/// Advertised text encoding for string-shaped bodies.
///
/// Rust strings are always UTF-8; the charset only selects the `charset=`
/// parameter written into the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charset(&'static str);

impl Charset {
    /// UTF-8, the default.
    pub const UTF_8: Self = Self("utf-8");
    /// US-ASCII.
    pub const US_ASCII: Self = Self("us-ascii");

    /// The charset label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::UTF_8
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// Payload
// ============================================================================

/// A fully formed request body: bytes plus content metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    content_type: String,
    bytes: Bytes,
}

impl Payload {
    /// Create a payload from raw bytes and a content type.
    #[must_use]
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Create a text payload with the given media type and charset.
    #[must_use]
    pub fn text(media_type: &str, charset: Charset, text: impl Into<String>) -> Self {
        Self {
            content_type: format!("{media_type}; charset={charset}"),
            bytes: Bytes::from(text.into().into_bytes()),
        }
    }

    /// Create an `application/octet-stream` payload.
    #[must_use]
    pub fn octet_stream(bytes: impl Into<Bytes>) -> Self {
        Self::new("application/octet-stream", bytes)
    }

    /// The content type, including any charset parameter.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The body bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into `(content_type, bytes)`.
    #[must_use]
    pub fn into_parts(self) -> (String, Bytes) {
        (self.content_type, self.bytes)
    }
}

// A payload is a structured object as far as classification goes; the body
// formatter recognizes it before any category-based handling applies.
impl IntoValue for Payload {
    const KIND: ValueKind = ValueKind::Composite;

    fn into_value(self) -> Value {
        Value::Payload(self)
    }
}

// ============================================================================
// Serializer strategies
// ============================================================================

/// Pluggable string-encoding strategy for request bodies.
///
/// Strategies turn an arbitrary [`Value`] into body text plus a media type.
/// Two are built in, matching the serialization pair this crate depends on:
/// [`JsonFormatter`] and [`FormFormatter`].
pub trait BodyFormatter: Send + Sync {
    /// Media type of the produced text, without charset parameter.
    fn media_type(&self) -> &'static str;

    /// Serialize the value to body text.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in this format.
    fn serialize(&self, value: &Value, charset: Charset) -> Result<String>;
}

/// JSON body strategy (`application/json`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl BodyFormatter for JsonFormatter {
    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn serialize(&self, value: &Value, _charset: Charset) -> Result<String> {
        serde_json::to_string(value).map_err(Into::into)
    }
}

/// Form URL-encoded body strategy (`application/x-www-form-urlencoded`).
///
/// Sequence values inside a map serialize as repeated fields
/// (`tags=a&tags=b`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFormatter;

impl BodyFormatter for FormFormatter {
    fn media_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn serialize(&self, value: &Value, _charset: Charset) -> Result<String> {
        serde_html_form::to_string(value).map_err(Into::into)
    }
}

// ============================================================================
// Body formatter
// ============================================================================

/// Produce the request body for a value.
///
/// A [`Value::Payload`] passes through unchanged. A [`Value::Null`] becomes
/// an empty text body. A plain string is used as the body text without
/// serialization; everything else is serialized by the strategy. The
/// asynchronous boundary around body generation lives in the hook that calls
/// this.
///
/// # Errors
///
/// Returns an error if the strategy fails on the value.
pub fn format_body(
    value: &Value,
    formatter: &dyn BodyFormatter,
    charset: Charset,
) -> Result<Payload> {
    match value {
        Value::Payload(payload) => Ok(payload.clone()),
        Value::Null => Ok(Payload::text(formatter.media_type(), charset, "")),
        Value::Simple(Scalar::Str(text)) => {
            Ok(Payload::text(formatter.media_type(), charset, text.clone()))
        }
        other => {
            let text = formatter.serialize(other, charset)?;
            Ok(Payload::text(formatter.media_type(), charset, text))
        }
    }
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// Failures carry the path to the offending field (e.g. `user.address.city`).
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Composite;

    #[test]
    fn payload_passes_through_unchanged() {
        let original = Payload::new("application/pdf", &b"%PDF"[..]);
        let value = original.clone().into_value();

        let body = format_body(&value, &JsonFormatter, Charset::UTF_8).expect("body");
        assert_eq!(body, original);
    }

    #[test]
    fn plain_string_is_used_as_body_text() {
        let value = String::from(r#"{"already":"serialized"}"#).into_value();

        let body = format_body(&value, &JsonFormatter, Charset::UTF_8).expect("body");
        assert_eq!(body.content_type(), "application/json; charset=utf-8");
        assert_eq!(body.bytes().as_ref(), br#"{"already":"serialized"}"#);
    }

    #[test]
    fn null_becomes_an_empty_body() {
        let body = format_body(&Value::Null, &JsonFormatter, Charset::UTF_8).expect("body");
        assert!(body.bytes().is_empty());
        assert_eq!(body.content_type(), "application/json; charset=utf-8");
    }

    #[test]
    fn composite_serializes_as_json() {
        let value = Composite::new("User")
            .field("name", "Alice")
            .field("age", 30)
            .into_value();

        let body = format_body(&value, &JsonFormatter, Charset::UTF_8).expect("body");
        assert_eq!(body.bytes().as_ref(), br#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn composite_serializes_as_form() {
        let value = Composite::new("Login")
            .field("username", "alice")
            .field("password", "secret")
            .into_value();

        let body = format_body(&value, &FormFormatter, Charset::UTF_8).expect("body");
        assert_eq!(
            body.content_type(),
            "application/x-www-form-urlencoded; charset=utf-8"
        );
        assert_eq!(body.bytes().as_ref(), b"username=alice&password=secret");
    }

    #[test]
    fn form_repeats_sequence_fields() {
        let value = Composite::new("Filter")
            .field("tags", vec!["rust", "http"])
            .into_value();

        let body = format_body(&value, &FormFormatter, Charset::UTF_8).expect("body");
        assert_eq!(body.bytes().as_ref(), b"tags=rust&tags=http");
    }

    #[test]
    fn charset_lands_in_the_content_type() {
        let value = String::from("plain").into_value();
        let body = format_body(&value, &JsonFormatter, Charset::US_ASCII).expect("body");
        assert_eq!(body.content_type(), "application/json; charset=us-ascii");
    }

    #[test]
    fn from_json_reports_the_error_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<User> = from_json(br#"{"address":{}}"#);
        let err = result.expect_err("should fail");
        let message = err.to_string();
        assert!(message.contains("address"), "missing path in: {message}");
        assert!(message.contains("city"), "missing field in: {message}");
    }
}
