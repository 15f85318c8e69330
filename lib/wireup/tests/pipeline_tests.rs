//! Integration tests for the hook pipeline.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use wireup::hooks::{BasicAuth, Body, Query, StaticHeader};
use wireup::{
    ActionContext, ActionDescriptor, ActionHook, CancellationToken, Composite, Error, IntoValue,
    Invoker, Method, ParameterDecl, ParameterDescriptor, ParameterHook, Request, Response, Result,
    Transport,
};

// ============================================================================
// Test doubles
// ============================================================================

/// Transport that records every request and answers with a canned response.
#[derive(Debug, Clone)]
struct MockTransport {
    requests: Arc<Mutex<Vec<Request<Bytes>>>>,
    status: u16,
    body: Bytes,
    fail: bool,
}

impl MockTransport {
    fn ok() -> Self {
        Self::with_body("{}")
    }

    fn with_body(body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status: 200,
            body: Bytes::from(body.to_owned()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    fn sent(&self) -> Vec<Request<Bytes>> {
        self.requests.lock().expect("lock").clone()
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        request: Request<Bytes>,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        let requests = Arc::clone(&self.requests);
        let status = self.status;
        let body = self.body.clone();
        let fail = self.fail;
        async move {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if fail {
                return Err(Error::transport("connection refused"));
            }
            requests.lock().expect("lock").push(request);
            Ok(Response::new(status, HashMap::new(), body))
        }
    }
}

/// Hook that records its execution order and can be told to fail.
#[derive(Debug, Clone)]
struct TraceHook {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl TraceHook {
    fn new(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            fail: false,
        }
    }

    fn failing(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            fail: true,
        }
    }

    fn record(&self, phase: &str) {
        self.log
            .lock()
            .expect("lock")
            .push(format!("{phase}:{}", self.name));
    }
}

#[async_trait]
impl ActionHook for TraceHook {
    async fn before_request(&self, _context: &mut ActionContext) -> Result<()> {
        self.record("before");
        if self.fail {
            return Err(Error::precondition(format!("hook {} failed", self.name)));
        }
        Ok(())
    }

    async fn after_request(&self, _context: &mut ActionContext) -> Result<()> {
        self.record("after");
        Ok(())
    }
}

#[async_trait]
impl ParameterHook for TraceHook {
    async fn before_request(
        &self,
        _context: &mut ActionContext,
        _parameter: &ParameterDescriptor,
    ) -> Result<()> {
        ActionHook::before_request(self, _context).await
    }

    async fn after_request(
        &self,
        _context: &mut ActionContext,
        _parameter: &ParameterDescriptor,
    ) -> Result<()> {
        ActionHook::after_request(self, _context).await
    }
}

/// After-request hook that captures the response status it observed.
#[derive(Debug, Clone)]
struct StatusProbe {
    seen: Arc<Mutex<Option<u16>>>,
}

#[async_trait]
impl ActionHook for StatusProbe {
    async fn before_request(&self, _context: &mut ActionContext) -> Result<()> {
        Ok(())
    }

    async fn after_request(&self, context: &mut ActionContext) -> Result<()> {
        *self.seen.lock().expect("lock") = context.response().map(Response::status);
        Ok(())
    }
}

fn url(path: &str) -> url::Url {
    format!("https://api.example.com{path}").parse().expect("url")
}

// ============================================================================
// Scenarios
// ============================================================================

/// A full request: auth and static headers, query parameter, JSON body.
#[tokio::test]
async fn assembles_a_complete_request() {
    let action = Arc::new(
        ActionDescriptor::new("create_user", Method::Post, url("/users"))
            .with_hook(BasicAuth::new("user", "pass").expect("auth"))
            .with_hook(StaticHeader::new("X-Client", "wireup").expect("header"))
            .with_parameter(ParameterDecl::of::<bool>("notify").with_hook(Query::new()))
            .with_parameter(ParameterDecl::of::<Composite>("user").with_hook(Body::json())),
    );

    let user = Composite::new("User").field("name", "Alice").field("age", 30);
    let context = ActionContext::new(
        Arc::clone(&action),
        vec![true.into_value(), user.into_value()],
    )
    .expect("context");

    let transport = MockTransport::ok();
    let response = Invoker::new(transport.clone())
        .invoke(context)
        .await
        .expect("invoke");
    assert!(response.is_success());

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let request = sent.first().expect("request");
    assert_eq!(request.method(), Method::Post);
    assert_eq!(request.url().query(), Some("notify=true"));
    assert_eq!(request.header("Authorization"), Some("Basic dXNlcjpwYXNz"));
    assert_eq!(request.header("X-Client"), Some("wireup"));
    assert_eq!(
        request.header("Content-Type"),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(
        request.body().map(|b| b.as_ref()),
        Some(&br#"{"name":"Alice","age":30}"#[..])
    );
}

/// Action-level hooks run before parameter-level hooks, each in
/// declaration order, and after hooks follow the same convention.
#[tokio::test]
async fn hooks_run_in_declaration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let action = Arc::new(
        ActionDescriptor::new("ordered", Method::Get, url("/"))
            .with_hook(TraceHook::new("a1", &log))
            .with_hook(TraceHook::new("a2", &log))
            .with_parameter(
                ParameterDecl::of::<u32>("first").with_hook(TraceHook::new("p1", &log)),
            )
            .with_parameter(
                ParameterDecl::of::<u32>("second").with_hook(TraceHook::new("p2", &log)),
            ),
    );

    let context = ActionContext::new(
        Arc::clone(&action),
        vec![1u32.into_value(), 2u32.into_value()],
    )
    .expect("context");

    Invoker::new(MockTransport::ok())
        .invoke(context)
        .await
        .expect("invoke");

    let entries = log.lock().expect("lock").clone();
    assert_eq!(
        entries,
        [
            "before:a1", "before:a2", "before:p1", "before:p2", "after:a1", "after:a2",
            "after:p1", "after:p2",
        ]
    );
}

/// When a hook fails, later hooks never run and the transport is never
/// contacted; the surfaced error is the failing hook's own.
#[tokio::test]
async fn failing_hook_aborts_the_pipeline() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let action = Arc::new(
        ActionDescriptor::new("aborted", Method::Get, url("/"))
            .with_hook(TraceHook::new("a", &log))
            .with_hook(TraceHook::failing("b", &log))
            .with_hook(TraceHook::new("c", &log)),
    );

    let context = ActionContext::new(Arc::clone(&action), Vec::new()).expect("context");
    let transport = MockTransport::ok();
    let err = Invoker::new(transport.clone())
        .invoke(context)
        .await
        .expect_err("hook b fails");

    assert!(err.is_precondition());
    assert!(err.to_string().contains("hook b failed"));
    assert_eq!(
        log.lock().expect("lock").clone(),
        ["before:a", "before:b"]
    );
    assert!(transport.sent().is_empty());
}

/// A transport failure surfaces unchanged and suppresses after hooks.
#[tokio::test]
async fn transport_failure_skips_after_hooks() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let action = Arc::new(
        ActionDescriptor::new("unreachable", Method::Get, url("/"))
            .with_hook(TraceHook::new("a", &log)),
    );

    let context = ActionContext::new(Arc::clone(&action), Vec::new()).expect("context");
    let err = Invoker::new(MockTransport::failing())
        .invoke(context)
        .await
        .expect_err("transport fails");

    assert!(err.is_transport());
    assert_eq!(log.lock().expect("lock").clone(), ["before:a"]);
}

/// A cancellation observed before the send aborts without contacting the
/// transport.
#[tokio::test]
async fn cancellation_surfaces_before_the_send() {
    let action = Arc::new(ActionDescriptor::new("cancelled", Method::Get, url("/")));
    let token = CancellationToken::new();
    token.cancel();

    let context = ActionContext::new(Arc::clone(&action), Vec::new())
        .expect("context")
        .with_cancellation(token);

    let transport = MockTransport::ok();
    let err = Invoker::new(transport.clone())
        .invoke(context)
        .await
        .expect_err("cancelled");

    assert!(err.is_cancelled());
    assert!(transport.sent().is_empty());
}

/// Two body-contributing parameters are a usage error, surfaced when the
/// second one runs; nothing is sent.
#[tokio::test]
async fn duplicate_body_contributors_are_rejected() {
    let action = Arc::new(
        ActionDescriptor::new("two_bodies", Method::Post, url("/things"))
            .with_parameter(ParameterDecl::of::<Composite>("first").with_hook(Body::json()))
            .with_parameter(ParameterDecl::of::<Composite>("second").with_hook(Body::json())),
    );

    let context = ActionContext::new(
        Arc::clone(&action),
        vec![
            Composite::new("A").field("x", 1).into_value(),
            Composite::new("B").field("y", 2).into_value(),
        ],
    )
    .expect("context");

    let transport = MockTransport::ok();
    let err = Invoker::new(transport.clone())
        .invoke(context)
        .await
        .expect_err("second body");

    assert!(err.is_precondition());
    assert!(err.to_string().contains("second"));
    assert!(transport.sent().is_empty());
}

/// A body parameter on a GET action fails fast.
#[tokio::test]
async fn body_on_a_get_action_is_rejected() {
    let action = Arc::new(
        ActionDescriptor::new("get_with_body", Method::Get, url("/things"))
            .with_parameter(ParameterDecl::of::<Composite>("payload").with_hook(Body::json())),
    );

    let context = ActionContext::new(
        Arc::clone(&action),
        vec![Composite::new("A").field("x", 1).into_value()],
    )
    .expect("context");

    let transport = MockTransport::ok();
    let err = Invoker::new(transport.clone())
        .invoke(context)
        .await
        .expect_err("GET has no body");

    assert!(err.is_precondition());
    assert!(transport.sent().is_empty());
}

/// After hooks observe the response on the context.
#[tokio::test]
async fn after_hooks_observe_the_response() {
    let seen = Arc::new(Mutex::new(None));
    let action = Arc::new(
        ActionDescriptor::new("probed", Method::Get, url("/")).with_hook(StatusProbe {
            seen: Arc::clone(&seen),
        }),
    );

    let context = ActionContext::new(Arc::clone(&action), Vec::new()).expect("context");
    Invoker::new(MockTransport::ok())
        .invoke(context)
        .await
        .expect("invoke");

    assert_eq!(*seen.lock().expect("lock"), Some(200));
}

/// `invoke_json` extracts the declared payload type from the response.
#[tokio::test]
async fn invoke_json_decodes_the_declared_payload() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct User {
        id: u64,
        name: String,
    }

    let action = Arc::new(
        ActionDescriptor::new("get_user", Method::Get, url("/users/7"))
            .returning::<User>(),
    );

    let context = ActionContext::new(Arc::clone(&action), Vec::new()).expect("context");
    let user: User = Invoker::new(MockTransport::with_body(r#"{"id":7,"name":"Alice"}"#))
        .invoke_json(context)
        .await
        .expect("decode");

    assert_eq!(
        user,
        User {
            id: 7,
            name: "Alice".to_owned()
        }
    );
}

/// A null argument contributes nothing to the request, whatever its
/// declared type.
#[tokio::test]
async fn null_arguments_contribute_nothing() {
    let action = Arc::new(
        ActionDescriptor::new("search", Method::Get, url("/search"))
            .with_parameter(ParameterDecl::of::<Option<Vec<String>>>("tags").with_hook(Query::new())),
    );

    let context = ActionContext::new(
        Arc::clone(&action),
        vec![None::<Vec<String>>.into_value()],
    )
    .expect("context");

    let transport = MockTransport::ok();
    Invoker::new(transport.clone())
        .invoke(context)
        .await
        .expect("invoke");

    let sent = transport.sent();
    assert_eq!(sent.first().map(|r| r.url().query()), Some(None));
}
