//! Form-urlencoded body hook built on the key-value formatter.

use async_trait::async_trait;

use wireup_core::{Charset, Payload, Result};

use crate::context::ActionContext;
use crate::descriptor::ParameterDescriptor;
use crate::hook::ParameterHook;
use crate::hooks::assign_body;

/// Sends a parameter as an `application/x-www-form-urlencoded` body.
///
/// The parameter is flattened one level by the key-value formatter and the
/// resulting pairs are percent-encoded in order. For full-depth
/// serialization through a strategy, use [`super::Body`] instead.
///
/// Requires a method that may carry a body, and fails when another
/// parameter already contributed one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBody {
    charset: Charset,
}

impl FormBody {
    /// Create the hook with the default charset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the advertised charset.
    #[must_use]
    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }
}

#[async_trait]
impl ParameterHook for FormBody {
    async fn before_request(
        &self,
        context: &mut ActionContext,
        parameter: &ParameterDescriptor,
    ) -> Result<()> {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in parameter.pairs() {
            serializer.append_pair(&name, value.as_deref().unwrap_or_default());
        }
        let payload = Payload::text(
            "application/x-www-form-urlencoded",
            self.charset,
            serializer.finish(),
        );
        assign_body(context, parameter, payload)
    }
}
