//! One-level flattening of values into key-value pairs.
//!
//! [`to_pairs`] turns a named argument into the flat `(name, value)` pairs
//! that query strings, form bodies, and headers are built from. Flattening
//! is deliberately one level deep: map values and composite fields are
//! rendered with their default string form, never recursively expanded.
//! Full-depth serialization is the body formatter's job
//! ([`crate::format_body`]).

use crate::value::Value;

/// A formatted pair: the wire name and an optional string value.
///
/// `None` is a present key with an absent value; how it is rendered (empty
/// string, skipped) is decided by the consumer.
pub type Pair = (String, Option<String>);

/// The canonical string form of a value, or `None` for [`Value::Null`].
#[must_use]
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Flatten a named value into ordered key-value pairs.
///
/// Rules, by shape:
///
/// - `Null` yields nothing, whatever the declared category.
/// - `Simple` yields the single pair `(name, value)`.
/// - Maps yield one pair per entry in iteration order; keys are stringified
///   and the parameter's own name is not used.
/// - `Sequence` repeats the parameter name once per element, in order.
/// - `Composite` yields one pair per field in declaration order.
/// - `Payload` yields nothing; a raw body has no key-value projection.
///
/// The output order follows the input order exactly, and the function is
/// pure: flattening the same value twice yields identical sequences.
#[must_use]
pub fn to_pairs(name: &str, value: &Value) -> Vec<Pair> {
    match value {
        Value::Null | Value::Payload(_) => Vec::new(),
        Value::Simple(scalar) => vec![(name.to_owned(), Some(scalar.to_string()))],
        Value::StringMap(entries) => entries
            .iter()
            .map(|(key, value)| (key.clone(), stringify(value)))
            .collect(),
        Value::ObjectMap(entries) => entries
            .iter()
            .map(|(key, value)| (key.to_string(), stringify(value)))
            .collect(),
        Value::Sequence(items) => items
            .iter()
            .map(|item| (name.to_owned(), stringify(item)))
            .collect(),
        Value::Composite(composite) => composite
            .fields()
            .iter()
            .map(|(field, value)| ((*field).to_owned(), stringify(value)))
            .collect(),
    }
}
