//! Call declarations and per-invocation parameter descriptors.
//!
//! An [`ActionDescriptor`] is built once per declared call and shared
//! read-only (behind an `Arc`) across invocations. Binding argument values
//! to its [`ParameterDecl`]s produces the per-invocation
//! [`ParameterDescriptor`]s owned by that invocation's context.

use std::any::type_name;
use std::sync::Arc;

use url::Url;

use wireup_core::{Error, IntoValue, Method, Pair, Result, Value, ValueKind, to_pairs};

use crate::hook::{ActionHook, ParameterHook};

// ============================================================================
// Return descriptor
// ============================================================================

/// The declared return shape of an action: the wrapped asynchronous result
/// type and the payload type inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnDescriptor {
    wrapped: &'static str,
    payload: &'static str,
}

impl ReturnDescriptor {
    /// Describe an action returning `Result<T>`.
    #[must_use]
    pub fn of<T>() -> Self {
        Self {
            wrapped: type_name::<Result<T>>(),
            payload: type_name::<T>(),
        }
    }

    /// The full wrapped return type name.
    #[must_use]
    pub const fn wrapped(&self) -> &'static str {
        self.wrapped
    }

    /// The unwrapped payload type name.
    #[must_use]
    pub const fn payload(&self) -> &'static str {
        self.payload
    }
}

impl Default for ReturnDescriptor {
    fn default() -> Self {
        Self::of::<()>()
    }
}

// ============================================================================
// Parameter declaration
// ============================================================================

/// One formal parameter of a declared call: name, compile-time
/// classification of the declared type, and the hooks that consume it.
#[derive(Debug)]
pub struct ParameterDecl {
    name: String,
    kind: ValueKind,
    hooks: Vec<Arc<dyn ParameterHook>>,
}

impl ParameterDecl {
    /// Declare a parameter of type `T`. The classification is fixed here,
    /// before any runtime value exists.
    #[must_use]
    pub fn of<T: IntoValue>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: T::KIND,
            hooks: Vec::new(),
        }
    }

    /// Append a hook. Hooks run in the order they are registered.
    #[must_use]
    pub fn with_hook(mut self, hook: impl ParameterHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Declared parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared-type classification.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Registered hooks, in order.
    #[must_use]
    pub fn hooks(&self) -> &[Arc<dyn ParameterHook>] {
        &self.hooks
    }
}

// ============================================================================
// Action descriptor
// ============================================================================

/// Identity of one declared API call.
///
/// Immutable after construction; invocations share it read-only.
///
/// # Example
///
/// ```
/// use wireup::hooks::Query;
/// use wireup::{ActionDescriptor, Method, ParameterDecl};
///
/// let action = ActionDescriptor::new(
///     "search",
///     Method::Get,
///     "https://api.example.com/search".parse().expect("url"),
/// )
/// .with_parameter(ParameterDecl::of::<String>("q").with_hook(Query::new()))
/// .returning::<Vec<String>>();
///
/// assert_eq!(action.parameters().len(), 1);
/// ```
#[derive(Debug)]
pub struct ActionDescriptor {
    name: String,
    method: Method,
    url: Url,
    hooks: Vec<Arc<dyn ActionHook>>,
    parameters: Vec<ParameterDecl>,
    returns: ReturnDescriptor,
}

impl ActionDescriptor {
    /// Declare a call with its name, method, and target URL.
    #[must_use]
    pub fn new(name: impl Into<String>, method: Method, url: Url) -> Self {
        Self {
            name: name.into(),
            method,
            url,
            hooks: Vec::new(),
            parameters: Vec::new(),
            returns: ReturnDescriptor::default(),
        }
    }

    /// Append an action-level hook. Hooks run in registration order, before
    /// any parameter-level hook.
    #[must_use]
    pub fn with_hook(mut self, hook: impl ActionHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Append a parameter declaration. Declaration order is invocation
    /// order for the parameters' hooks.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Record the declared return payload type.
    #[must_use]
    pub fn returning<T>(mut self) -> Self {
        self.returns = ReturnDescriptor::of::<T>();
        self
    }

    /// Declared call name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Action-level hooks, in order.
    #[must_use]
    pub fn hooks(&self) -> &[Arc<dyn ActionHook>] {
        &self.hooks
    }

    /// Parameter declarations, in order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDecl] {
        &self.parameters
    }

    /// Declared return shape.
    #[must_use]
    pub const fn returns(&self) -> &ReturnDescriptor {
        &self.returns
    }
}

// ============================================================================
// Bound parameter descriptor
// ============================================================================

/// A declared parameter with its runtime value bound, owned by one
/// invocation's context and dropped with it.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    name: String,
    kind: ValueKind,
    value: Value,
    hooks: Vec<Arc<dyn ParameterHook>>,
}

impl ParameterDescriptor {
    /// Bind a runtime value to a declaration.
    ///
    /// A non-null value whose runtime shape disagrees with the declared
    /// classification is rejected; a null value is accepted for any
    /// declared type.
    pub(crate) fn bind(decl: &ParameterDecl, value: Value) -> Result<Self> {
        if let Some(kind) = value.kind()
            && kind != decl.kind()
        {
            return Err(Error::precondition(format!(
                "parameter '{}' is declared as {} but was bound to a {} value",
                decl.name(),
                decl.kind(),
                kind,
            )));
        }

        Ok(Self {
            name: decl.name().to_owned(),
            kind: decl.kind(),
            value,
            hooks: decl.hooks().to_vec(),
        })
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared-type classification.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Bound runtime value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` if the bound value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Registered hooks, in order.
    #[must_use]
    pub fn hooks(&self) -> &[Arc<dyn ParameterHook>] {
        &self.hooks
    }

    /// Flatten the bound value into key-value pairs.
    #[must_use]
    pub fn pairs(&self) -> Vec<Pair> {
        to_pairs(&self.name, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_descriptor_captures_type_names() {
        let returns = ReturnDescriptor::of::<u64>();
        assert!(returns.wrapped().contains("Result"));
        assert_eq!(returns.payload(), "u64");
    }

    #[test]
    fn parameter_decl_records_the_declared_kind() {
        assert_eq!(
            ParameterDecl::of::<Option<u32>>("page").kind(),
            ValueKind::Simple
        );
        assert_eq!(
            ParameterDecl::of::<Vec<String>>("tags").kind(),
            ValueKind::Sequence
        );
    }

    #[test]
    fn bind_accepts_matching_values() {
        let decl = ParameterDecl::of::<u32>("page");
        let bound = ParameterDescriptor::bind(&decl, 2u32.into_value()).expect("bind");

        assert_eq!(bound.name(), "page");
        assert_eq!(bound.kind(), ValueKind::Simple);
        assert_eq!(bound.pairs(), [("page".to_owned(), Some("2".to_owned()))]);
    }

    #[test]
    fn bind_accepts_null_for_any_declared_type() {
        let decl = ParameterDecl::of::<Vec<String>>("tags");
        let bound = ParameterDescriptor::bind(&decl, None::<Vec<String>>.into_value())
            .expect("bind");

        assert!(bound.is_null());
        assert!(bound.pairs().is_empty());
    }

    #[test]
    fn bind_rejects_a_mismatched_shape() {
        let decl = ParameterDecl::of::<u32>("page");
        let err = ParameterDescriptor::bind(&decl, vec![1u32].into_value())
            .expect_err("shape mismatch");

        assert!(err.is_precondition());
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn action_descriptor_keeps_declaration_order() {
        let action = ActionDescriptor::new(
            "list_users",
            Method::Get,
            "https://api.example.com/users".parse().expect("url"),
        )
        .with_parameter(ParameterDecl::of::<u32>("page"))
        .with_parameter(ParameterDecl::of::<u32>("limit"))
        .returning::<Vec<String>>();

        let names: Vec<&str> = action.parameters().iter().map(ParameterDecl::name).collect();
        assert_eq!(names, ["page", "limit"]);
        assert_eq!(action.returns().payload(), type_name::<Vec<String>>());
    }
}
