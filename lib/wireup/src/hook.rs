//! Hook capability traits.
//!
//! A hook is a unit of behavior invoked at a defined point of an
//! invocation: before the request is sent, and optionally after the
//! response arrives. Hooks are registered explicitly on declarations, at
//! action or parameter granularity, and run strictly sequentially in
//! declaration order - each hook may depend on mutations made by an
//! earlier one.
//!
//! The `Debug` supertrait doubles as the descriptive string form of a hook;
//! implementations holding secrets should mask them there.

use async_trait::async_trait;
use std::fmt;

use wireup_core::Result;

use crate::context::ActionContext;
use crate::descriptor::ParameterDescriptor;

/// Behavior attached to a whole action declaration.
#[async_trait]
pub trait ActionHook: fmt::Debug + Send + Sync {
    /// Runs before the request is sent. May read and mutate the request
    /// under construction; a returned error aborts the invocation without
    /// contacting the transport.
    async fn before_request(&self, context: &mut ActionContext) -> Result<()>;

    /// Runs after a successful send, with the response available on the
    /// context. Defaults to doing nothing.
    async fn after_request(&self, _context: &mut ActionContext) -> Result<()> {
        Ok(())
    }
}

/// Behavior attached to a single declared parameter.
///
/// The hook receives its own parameter descriptor alongside the shared
/// context; most implementations feed the descriptor through the key-value
/// or body formatter and merge the output into the request.
#[async_trait]
pub trait ParameterHook: fmt::Debug + Send + Sync {
    /// Runs before the request is sent, in parameter declaration order.
    async fn before_request(
        &self,
        context: &mut ActionContext,
        parameter: &ParameterDescriptor,
    ) -> Result<()>;

    /// Runs after a successful send. Defaults to doing nothing.
    async fn after_request(
        &self,
        _context: &mut ActionContext,
        _parameter: &ParameterDescriptor,
    ) -> Result<()> {
        Ok(())
    }
}
