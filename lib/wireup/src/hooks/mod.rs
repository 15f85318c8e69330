//! Built-in hook capabilities.
//!
//! Parameter-level:
//!
//! - [`Query`] - flattens a parameter into URL query pairs
//! - [`Header`] - flattens a parameter into request headers
//! - [`FormBody`] - flattens a parameter into a form-urlencoded body
//! - [`Body`] - serializes a parameter into the request body through a
//!   [`wireup_core::BodyFormatter`] strategy
//!
//! Action-level:
//!
//! - [`BasicAuth`] - adds an `Authorization: Basic <base64>` header
//! - [`StaticHeader`] - adds one fixed header
//!
//! Any other capability plugs in by implementing
//! [`ActionHook`](crate::ActionHook) or
//! [`ParameterHook`](crate::ParameterHook).

mod basic_auth;
mod body;
mod form;
mod header;
mod query;

pub use basic_auth::BasicAuth;
pub use body::Body;
pub use form::FormBody;
pub use header::{Header, StaticHeader};
pub use query::Query;

use wireup_core::{Error, Payload, Result};

use crate::context::ActionContext;
use crate::descriptor::ParameterDescriptor;

/// Shared body-assignment path for body-contributing hooks: validates the
/// method precondition and surfaces a duplicate contributor as a usage
/// error naming the parameter.
pub(crate) fn assign_body(
    context: &mut ActionContext,
    parameter: &ParameterDescriptor,
    payload: Payload,
) -> Result<()> {
    context.ensure_body_allowed()?;
    if context.request().has_body() {
        return Err(Error::precondition(format!(
            "parameter '{}' contributes a second request body; a call takes at most one body parameter",
            parameter.name(),
        )));
    }
    context.set_body(payload)
}
