//! Error types for wireup.
//!
//! Failures fall into four classes: configuration errors caught at
//! declaration time, precondition violations caught while a pipeline runs,
//! formatter errors from the serializer strategies, and transport or
//! cancellation failures surfaced unchanged from the send step. Every class
//! aborts the remainder of its own invocation and nothing else.

use derive_more::{Display, Error, From};

/// Main error type for wireup operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Invalid declaration discovered at setup time, before any request
    /// exists (e.g. a missing credential at hook construction).
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Configuration(#[error(not(source))] String),

    /// A hook's structural requirement violated at run time (e.g. a body
    /// attached to a bodyless request kind, or a second body contributor).
    #[display("precondition violated: {_0}")]
    #[from(skip)]
    Precondition(#[error(not(source))] String),

    /// JSON body serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g. `user.address.city`).
        path: String,
        /// Error message.
        message: String,
    },

    /// Non-success HTTP status reported by a transport.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Network-level failure reported by a transport.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(#[error(not(source))] String),

    /// The invocation's cancellation signal fired.
    #[display("invocation cancelled")]
    Cancelled,

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a precondition error.
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for setup-time declaration errors.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` for run-time structural violations.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Returns `true` for serializer strategy failures.
    #[must_use]
    pub const fn is_formatter(&self) -> bool {
        matches!(self, Self::JsonSerialization(_) | Self::FormSerialization(_))
    }

    /// Returns `true` for failures surfaced from the transport.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }

    /// Returns `true` when the invocation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::configuration("username is required");
        assert_eq!(err.to_string(), "configuration error: username is required");

        let err = Error::precondition("GET request cannot carry a body");
        assert_eq!(
            err.to_string(),
            "precondition violated: GET request cannot carry a body"
        );

        let err = Error::http(503, "Service Unavailable");
        assert_eq!(err.to_string(), "HTTP error 503: Service Unavailable");

        assert_eq!(Error::Cancelled.to_string(), "invocation cancelled");

        let err = Error::json_deserialization("user.address.city", "missing field `city`");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn error_classification() {
        assert!(Error::configuration("x").is_configuration());
        assert!(Error::precondition("x").is_precondition());
        assert!(Error::transport("x").is_transport());
        assert!(Error::http(500, "x").is_transport());
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::Cancelled.is_transport());
    }

    #[test]
    fn formatter_errors_are_grouped() {
        struct Broken;

        impl serde::Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("broken value"))
            }
        }

        let err: Error = serde_json::to_string(&Broken)
            .expect_err("serialization should fail")
            .into();
        assert!(err.is_formatter());
        assert!(!err.is_precondition());
    }

    #[test]
    fn error_status() {
        assert_eq!(Error::http(404, "Not Found").status(), Some(404));
        assert_eq!(Error::Cancelled.status(), None);
    }
}
