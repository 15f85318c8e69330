//! The hook pipeline.
//!
//! [`Invoker`] drives one [`ActionContext`] through its lifecycle: all
//! before-request hooks in declaration order (action-level first, then each
//! parameter's hooks in parameter order), the transport send, then the
//! after-request hooks in the same order convention. Execution is strictly
//! sequential; the first failure aborts the remainder of the pipeline, and
//! a failure before the send means the transport is never contacted.

use bytes::Bytes;
use tracing::{Instrument, debug, debug_span, warn};

use wireup_core::{Error, Response, Result, Transport};

use crate::context::{ActionContext, ActionState};

/// Executes invocations against a transport.
///
/// The invoker holds no per-invocation state; one instance can serve any
/// number of concurrent contexts.
///
/// # Example
///
/// ```ignore
/// let invoker = Invoker::new(transport);
/// let context = ActionContext::new(action, vec![42u64.into_value()])?;
/// let user: User = invoker.invoke_json(context).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Invoker<T> {
    transport: T,
}

impl<T> Invoker<T> {
    /// Create an invoker over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the invoker and return the transport.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> Invoker<T> {
    /// Run the full pipeline for one invocation and return the response.
    ///
    /// # Errors
    ///
    /// Returns the first hook, transport, or cancellation failure; the
    /// context ends in the `Failed` state and nothing further runs.
    pub async fn invoke(&self, mut context: ActionContext) -> Result<Response<Bytes>> {
        let span = debug_span!("invocation", action = context.action().name());
        match self.run(&mut context).instrument(span).await {
            Ok(response) => {
                context.set_state(ActionState::Completed);
                debug!(
                    action = context.action().name(),
                    status = response.status(),
                    "invocation completed"
                );
                Ok(response)
            }
            Err(error) => {
                context.set_state(ActionState::Failed);
                warn!(
                    action = context.action().name(),
                    error = %error,
                    "invocation failed"
                );
                Err(error)
            }
        }
    }

    /// Run the pipeline and decode the response body as JSON.
    ///
    /// This is the standard extraction for actions declared with
    /// `returning::<R>()`; a non-success status is surfaced as an HTTP
    /// error instead of being decoded.
    ///
    /// # Errors
    ///
    /// Returns pipeline failures, HTTP status errors, and deserialization
    /// failures.
    pub async fn invoke_json<R: serde::de::DeserializeOwned>(
        &self,
        context: ActionContext,
    ) -> Result<R> {
        let response = self.invoke(context).await?;
        if !response.is_success() {
            return Err(Error::http(response.status(), "non-success response"));
        }
        response.json()
    }

    async fn run(&self, context: &mut ActionContext) -> Result<Response<Bytes>> {
        context.set_state(ActionState::BeforeHooksRunning);
        debug!(action = context.action().name(), "running before-request hooks");

        let action = context.action().clone();
        for hook in action.hooks() {
            ensure_live(context)?;
            hook.before_request(context).await?;
        }

        // Descriptors are cloned out once so each hook can borrow its own
        // parameter alongside the mutable context.
        let parameters = context.parameters().to_vec();
        for parameter in &parameters {
            for hook in parameter.hooks() {
                ensure_live(context)?;
                hook.before_request(context, parameter).await?;
            }
        }

        ensure_live(context)?;
        debug!(
            action = context.action().name(),
            method = %context.request().method(),
            url = %context.request().url(),
            "sending request"
        );
        let response = self
            .transport
            .send(context.request().clone(), context.cancellation().clone())
            .await?;
        context.set_state(ActionState::Sent);
        context.set_response(response);

        context.set_state(ActionState::AfterHooksRunning);
        for hook in action.hooks() {
            hook.after_request(context).await?;
        }
        for parameter in &parameters {
            for hook in parameter.hooks() {
                hook.after_request(context, parameter).await?;
            }
        }

        context
            .take_response()
            .ok_or_else(|| Error::transport("response slot empty after send"))
    }
}

fn ensure_live(context: &ActionContext) -> Result<()> {
    if context.cancellation().is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}
