//! Declarative HTTP request construction.
//!
//! Declare an API call once - method, URL, parameters, and the hooks that
//! turn argument values into wire fragments - then execute it against any
//! [`Transport`] with per-invocation argument binding.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use wireup::prelude::*;
//! use wireup::hooks::{BasicAuth, Body, Query};
//!
//! let action = Arc::new(
//!     ActionDescriptor::new("create_user", Method::Post, url)
//!         .with_hook(BasicAuth::new("user", "secret")?)
//!         .with_parameter(ParameterDecl::of::<bool>("notify").with_hook(Query::new()))
//!         .with_parameter(ParameterDecl::of::<Composite>("user").with_hook(Body::json()))
//!         .returning::<User>(),
//! );
//!
//! let invoker = Invoker::new(transport);
//! let context = ActionContext::new(
//!     Arc::clone(&action),
//!     vec![true.into_value(), user.into_value()],
//! )?;
//! let created: User = invoker.invoke_json(context).await?;
//! ```
//!
//! Hooks run strictly in declaration order: action-level first, then each
//! parameter's hooks in parameter order. The first failure aborts the
//! invocation before the transport is contacted.

mod context;
mod descriptor;
mod hook;
pub mod hooks;
mod invoker;
pub mod prelude;

pub use context::{ActionContext, ActionState};
pub use descriptor::{ActionDescriptor, ParameterDecl, ParameterDescriptor, ReturnDescriptor};
pub use hook::{ActionHook, ParameterHook};
pub use invoker::Invoker;

// Re-export core types
pub use wireup_core::{
    BodyFormatter, CancellationToken, Charset, Composite, Error, FormFormatter, IntoValue,
    JsonFormatter, MapKey, Method, Pair, Payload, Request, RequestBuilder, Response, Result,
    Scalar, Transport, Value, ValueKind, format_body, from_json, stringify, to_pairs,
};

// Re-export http types for status codes and headers
pub use wireup_core::{StatusCode, header};
