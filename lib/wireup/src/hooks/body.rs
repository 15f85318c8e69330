//! Serialized request body hook.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use wireup_core::{BodyFormatter, Charset, FormFormatter, JsonFormatter, Result, format_body};

use crate::context::ActionContext;
use crate::descriptor::ParameterDescriptor;
use crate::hook::ParameterHook;
use crate::hooks::assign_body;

/// Sends a parameter as the request body.
///
/// A value that already is a [`wireup_core::Payload`] passes through
/// unchanged and a plain string becomes the body text as-is; anything else
/// is serialized by the configured [`BodyFormatter`] strategy.
///
/// Requires a method that may carry a body, and fails when another
/// parameter already contributed one.
#[derive(Clone)]
pub struct Body {
    formatter: Arc<dyn BodyFormatter>,
    charset: Charset,
}

impl Body {
    /// Body serialized as JSON.
    #[must_use]
    pub fn json() -> Self {
        Self::with_formatter(JsonFormatter)
    }

    /// Body serialized as form URL-encoded text.
    #[must_use]
    pub fn form() -> Self {
        Self::with_formatter(FormFormatter)
    }

    /// Body serialized by a custom strategy.
    #[must_use]
    pub fn with_formatter(formatter: impl BodyFormatter + 'static) -> Self {
        Self {
            formatter: Arc::new(formatter),
            charset: Charset::default(),
        }
    }

    /// Override the configured default charset.
    #[must_use]
    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("media_type", &self.formatter.media_type())
            .field("charset", &self.charset)
            .finish()
    }
}

#[async_trait]
impl ParameterHook for Body {
    async fn before_request(
        &self,
        context: &mut ActionContext,
        parameter: &ParameterDescriptor,
    ) -> Result<()> {
        let payload = format_body(parameter.value(), self.formatter.as_ref(), self.charset)?;
        assign_body(context, parameter, payload)
    }
}
