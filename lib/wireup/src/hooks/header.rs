//! Header hooks.

use async_trait::async_trait;

use wireup_core::{Error, Result};

use crate::context::ActionContext;
use crate::descriptor::ParameterDescriptor;
use crate::hook::{ActionHook, ParameterHook};

/// Sends a parameter as request headers.
///
/// The flattened pairs become headers: a simple value contributes one
/// header named after the parameter, a map or composite contributes one
/// per key. Pairs with absent values are skipped rather than sent empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Header;

impl Header {
    /// Create the hook.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ParameterHook for Header {
    async fn before_request(
        &self,
        context: &mut ActionContext,
        parameter: &ParameterDescriptor,
    ) -> Result<()> {
        for (name, value) in parameter.pairs() {
            if let Some(value) = value {
                context.request_mut().set_header(name, value);
            }
        }
        Ok(())
    }
}

/// Adds one fixed header declared with the action.
#[derive(Debug, Clone)]
pub struct StaticHeader {
    name: String,
    value: String,
}

impl StaticHeader {
    /// Declare the header.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the header name is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::configuration("header name must not be empty"));
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }
}

#[async_trait]
impl ActionHook for StaticHeader {
    async fn before_request(&self, context: &mut ActionContext) -> Result<()> {
        context
            .request_mut()
            .set_header(self.name.clone(), self.value.clone());
        Ok(())
    }
}
