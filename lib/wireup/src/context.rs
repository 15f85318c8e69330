//! Per-invocation action context.
//!
//! One [`ActionContext`] exists per invocation. It owns the single request
//! object under construction, the bound parameter descriptors, and the
//! cancellation signal; every hook mutates it in sequence. The request is
//! only ever added to - headers set, query pairs appended, the body
//! assigned once - never rebuilt.

use std::sync::Arc;

use bytes::Bytes;
use derive_more::Display;
use tokio_util::sync::CancellationToken;

use wireup_core::{Error, Payload, Request, Response, Result, Value};

use crate::descriptor::{ActionDescriptor, ParameterDescriptor};

/// Lifecycle of one invocation.
///
/// `Failed` is absorbing: a failure in any running phase ends the
/// invocation there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ActionState {
    /// Context assembled, nothing run yet.
    #[display("created")]
    Created,
    /// Before-request hooks are executing.
    #[display("before-hooks-running")]
    BeforeHooksRunning,
    /// The transport accepted the request.
    #[display("sent")]
    Sent,
    /// After-request hooks are executing.
    #[display("after-hooks-running")]
    AfterHooksRunning,
    /// The invocation finished and the response was handed back.
    #[display("completed")]
    Completed,
    /// The invocation aborted.
    #[display("failed")]
    Failed,
}

/// Mutable shared state for one in-flight call.
#[derive(Debug)]
pub struct ActionContext {
    action: Arc<ActionDescriptor>,
    request: Request<Bytes>,
    parameters: Vec<ParameterDescriptor>,
    state: ActionState,
    cancellation: CancellationToken,
    response: Option<Response<Bytes>>,
}

impl ActionContext {
    /// Assemble a context by binding argument values to the declaration.
    ///
    /// Values bind positionally: the arity must match the declared
    /// parameter list, and each non-null value's shape must agree with its
    /// declared classification.
    ///
    /// # Errors
    ///
    /// Returns a precondition error on arity or shape mismatch.
    pub fn new(action: Arc<ActionDescriptor>, values: Vec<Value>) -> Result<Self> {
        if values.len() != action.parameters().len() {
            return Err(Error::precondition(format!(
                "action '{}' declares {} parameter(s) but {} value(s) were bound",
                action.name(),
                action.parameters().len(),
                values.len(),
            )));
        }

        let parameters = action
            .parameters()
            .iter()
            .zip(values)
            .map(|(decl, value)| ParameterDescriptor::bind(decl, value))
            .collect::<Result<Vec<_>>>()?;

        let request = Request::builder(action.method(), action.url().clone()).build();

        Ok(Self {
            action,
            request,
            parameters,
            state: ActionState::Created,
            cancellation: CancellationToken::new(),
            response: None,
        })
    }

    /// Attach an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// The shared declaration this invocation executes.
    #[must_use]
    pub fn action(&self) -> &Arc<ActionDescriptor> {
        &self.action
    }

    /// The request under construction.
    #[must_use]
    pub const fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    /// Mutable access to the request under construction.
    pub fn request_mut(&mut self) -> &mut Request<Bytes> {
        &mut self.request
    }

    /// Bound parameter descriptors, in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ActionState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ActionState) {
        self.state = state;
    }

    /// The invocation's cancellation signal.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// The response, available to after-request hooks once the send
    /// succeeded.
    #[must_use]
    pub const fn response(&self) -> Option<&Response<Bytes>> {
        self.response.as_ref()
    }

    pub(crate) fn set_response(&mut self, response: Response<Bytes>) {
        self.response = Some(response);
    }

    pub(crate) fn take_response(&mut self) -> Option<Response<Bytes>> {
        self.response.take()
    }

    /// Fails when the declared method may not carry a request body.
    ///
    /// Body-contributing hooks call this before generating any content.
    pub fn ensure_body_allowed(&self) -> Result<()> {
        let method = self.request.method();
        if method.forbids_body() {
            return Err(Error::precondition(format!(
                "a {method} request cannot carry a body"
            )));
        }
        Ok(())
    }

    /// Assign the request body and its content type.
    ///
    /// At most one body exists per request: assigning a second one is a
    /// usage error surfaced here, never resolved silently.
    pub fn set_body(&mut self, payload: Payload) -> Result<()> {
        if self.request.has_body() {
            return Err(Error::precondition(
                "a request body is already assigned; a call takes at most one body contributor",
            ));
        }
        let (content_type, bytes) = payload.into_parts();
        self.request.set_header("Content-Type", content_type);
        self.request.set_body(bytes);
        Ok(())
    }
}
