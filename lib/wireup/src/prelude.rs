//! Prelude module for convenient imports.
//!
//! ```ignore
//! use wireup::prelude::*;
//! ```

pub use crate::{
    ActionContext, ActionDescriptor, ActionHook, ActionState, CancellationToken, Charset,
    Composite, Error, IntoValue, Invoker, Method, ParameterDecl, ParameterDescriptor,
    ParameterHook, Payload, Request, Response, Result, Transport, Value, ValueKind,
};
