//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types and functions:
//!
//! ```ignore
//! use wireup_core::prelude::*;
//! ```

pub use crate::{
    BodyFormatter, Charset, Composite, Error, FormFormatter, IntoValue, JsonFormatter, Method,
    Payload, Request, Response, Result, Scalar, Transport, Value, ValueKind, format_body,
    from_json, to_pairs,
};
