//! Core types and formatters for the wireup declarative HTTP request
//! builder.
//!
//! This crate provides the wire-level half of wireup:
//! - [`Value`], [`Scalar`], [`Composite`] - the classified runtime value
//!   model
//! - [`IntoValue`] and [`ValueKind`] - compile-time type classification
//! - [`to_pairs`] - one-level key-value flattening
//! - [`format_body`] and [`BodyFormatter`] - body construction with
//!   pluggable serializer strategies ([`JsonFormatter`], [`FormFormatter`])
//! - [`Request`], [`Response`], [`Method`] - HTTP message types
//! - [`Error`] and [`Result`] - error handling
//! - [`Transport`] - the opaque send capability
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod body;
mod client;
mod error;
mod kv;
mod method;
pub mod prelude;
mod request;
mod response;
mod value;

pub use body::{BodyFormatter, Charset, FormFormatter, JsonFormatter, Payload, format_body, from_json};
pub use client::Transport;
pub use error::{Error, Result};
pub use kv::{Pair, stringify, to_pairs};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use value::{Composite, IntoValue, MapKey, Scalar, Value, ValueKind};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};

// Re-export the cancellation token used by `Transport`
pub use tokio_util::sync::CancellationToken;
