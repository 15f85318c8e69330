//! Query string parameter hook.

use async_trait::async_trait;

use wireup_core::Result;

use crate::context::ActionContext;
use crate::descriptor::ParameterDescriptor;
use crate::hook::ParameterHook;

/// Sends a parameter as URL query pairs.
///
/// The parameter is flattened with the key-value formatter, so a simple
/// value becomes one pair, a sequence repeats the name per element, and
/// maps and composites contribute their own keys. Absent values render as
/// empty strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query;

impl Query {
    /// Create the hook.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ParameterHook for Query {
    async fn before_request(
        &self,
        context: &mut ActionContext,
        parameter: &ParameterDescriptor,
    ) -> Result<()> {
        for (name, value) in parameter.pairs() {
            context
                .request_mut()
                .append_query(&name, value.as_deref().unwrap_or_default());
        }
        Ok(())
    }
}
