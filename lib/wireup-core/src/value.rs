//! Runtime value model and type-driven classification.
//!
//! Every argument bound to a declared API call becomes a [`Value`], a closed
//! set of structural shapes. The shape decides how the key-value formatter
//! ([`crate::to_pairs`]) flattens the argument and how the body formatter
//! ([`crate::format_body`]) serializes it.
//!
//! Classification happens at compile time through [`IntoValue`]: the impl
//! selected for the declared Rust type fixes the [`ValueKind`] before any
//! runtime value exists. `Option<T>` inherits the kind of `T` and binds
//! `None` as [`Value::Null`], so null-ness stays orthogonal to
//! classification.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::body::Payload;

// ============================================================================
// Classification
// ============================================================================

/// Structural category of a declared parameter type.
///
/// Exactly one category applies to any type. [`Composite`](Self::Composite)
/// is the fallback for structured objects that match none of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Directly string-convertible: numbers, booleans, strings, characters.
    Simple,
    /// Map whose key type is a string.
    StringKeyedMap,
    /// Map whose key type is any non-string scalar.
    ObjectKeyedMap,
    /// Ordered iterable of elements.
    Sequence,
    /// Structured object with named, ordered fields.
    Composite,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::StringKeyedMap => write!(f, "string-keyed map"),
            Self::ObjectKeyedMap => write!(f, "object-keyed map"),
            Self::Sequence => write!(f, "sequence"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

// ============================================================================
// Scalar
// ============================================================================

/// A directly string-convertible value.
///
/// The `Display` impl is the canonical string form used whenever a value is
/// written onto the wire without serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl serde::Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::UInt(v) => serializer.serialize_u64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Str(v) => serializer.serialize_str(v),
        }
    }
}

macro_rules! scalar_from {
    ($variant:ident: $via:ty => $($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Self::$variant(<$via>::from(value))
                }
            }
        )+
    };
}

scalar_from!(Bool: bool => bool);
scalar_from!(Int: i64 => i8, i16, i32, i64);
scalar_from!(UInt: u64 => u8, u16, u32, u64);
scalar_from!(Float: f64 => f32, f64);
scalar_from!(Str: String => String, &str);

impl From<char> for Scalar {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

// ============================================================================
// Value
// ============================================================================

/// A classified runtime value.
///
/// Entry and element order is preserved exactly as supplied; nothing is ever
/// re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value. Formats to an empty pair sequence and serializes as
    /// `null`.
    Null,
    /// A scalar.
    Simple(Scalar),
    /// Map entries with string keys, in iteration order.
    StringMap(Vec<(String, Value)>),
    /// Map entries with non-string keys, in iteration order.
    ObjectMap(Vec<(Scalar, Value)>),
    /// Ordered elements.
    Sequence(Vec<Value>),
    /// A structured object described by an explicit schema.
    Composite(Composite),
    /// A fully formed request body, used unchanged by the body formatter.
    Payload(Payload),
}

impl Value {
    /// Runtime structural category, or `None` for [`Value::Null`].
    ///
    /// A null value carries no shape of its own; the declared-type category
    /// lives on the parameter descriptor ([`IntoValue::KIND`]).
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Simple(_) => Some(ValueKind::Simple),
            Self::StringMap(_) => Some(ValueKind::StringKeyedMap),
            Self::ObjectMap(_) => Some(ValueKind::ObjectKeyedMap),
            Self::Sequence(_) => Some(ValueKind::Sequence),
            Self::Composite(_) | Self::Payload(_) => Some(ValueKind::Composite),
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Build a string-keyed map value, preserving entry order.
    pub fn string_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: IntoValue,
    {
        Self::StringMap(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_value()))
                .collect(),
        )
    }

    /// Build an object-keyed map value, preserving entry order.
    pub fn object_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Scalar>,
        V: IntoValue,
    {
        Self::ObjectMap(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_value()))
                .collect(),
        )
    }

    /// Build a sequence value, preserving element order.
    pub fn sequence<T: IntoValue>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Sequence(items.into_iter().map(IntoValue::into_value).collect())
    }
}

/// The default string form of a value.
///
/// Scalars print canonically. A composite prints its declared type name, a
/// payload its content type; maps and sequences print a compact bracketed
/// rendering. This is the one-level form used for nested values by the
/// key-value formatter, which never recurses into structures.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Simple(scalar) => scalar.fmt(f),
            Self::StringMap(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::ObjectMap(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Composite(composite) => composite.fmt(f),
            Self::Payload(payload) => f.write_str(payload.content_type()),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Null => serializer.serialize_none(),
            Self::Simple(scalar) => scalar.serialize(serializer),
            Self::StringMap(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::ObjectMap(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Composite(composite) => composite.serialize(serializer),
            Self::Payload(payload) => serializer.serialize_bytes(payload.bytes()),
        }
    }
}

// ============================================================================
// Composite schema
// ============================================================================

/// Explicit schema for a structured argument: a type name plus named fields
/// in declaration order.
///
/// Rust has no runtime property reflection, so composite types supply their
/// field list explicitly, either through this builder or by implementing
/// [`IntoValue`] with [`ValueKind::Composite`].
///
/// # Example
///
/// ```
/// use wireup_core::Composite;
///
/// let account = Composite::new("Account")
///     .field("Id", 5)
///     .field("Name", "a");
/// assert_eq!(account.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    type_name: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Composite {
    /// Start a schema for the named type.
    #[must_use]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is the order of `field` calls.
    #[must_use]
    pub fn field(mut self, name: &'static str, value: impl IntoValue) -> Self {
        self.fields.push((name, value.into_value()));
        self
    }

    /// The declared type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }
}

/// A composite's default string form is its type name, the analogue of a
/// default `ToString` on an object with no override.
impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

impl serde::Serialize for Composite {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// IntoValue: the compile-time classifier
// ============================================================================

/// Conversion from a declared Rust type into a classified [`Value`].
///
/// The impl selected for the declared static type is the classifier: its
/// [`KIND`](Self::KIND) is fixed at compile time, covering every type
/// exactly once. Structured types implement this with
/// [`ValueKind::Composite`] and an explicit [`Composite`] schema.
///
/// # Example
///
/// ```
/// use wireup_core::{Composite, IntoValue, Value, ValueKind};
///
/// struct Search {
///     q: String,
///     page: u32,
/// }
///
/// impl IntoValue for Search {
///     const KIND: ValueKind = ValueKind::Composite;
///
///     fn into_value(self) -> Value {
///         Composite::new("Search")
///             .field("q", self.q)
///             .field("page", self.page)
///             .into_value()
///     }
/// }
/// ```
pub trait IntoValue {
    /// Structural category of the declared type.
    const KIND: ValueKind;

    /// Convert the runtime value.
    fn into_value(self) -> Value;
}

macro_rules! simple_into_value {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoValue for $t {
                const KIND: ValueKind = ValueKind::Simple;

                fn into_value(self) -> Value {
                    Value::Simple(Scalar::from(self))
                }
            }
        )+
    };
}

simple_into_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, char, String, &str);

impl IntoValue for Scalar {
    const KIND: ValueKind = ValueKind::Simple;

    fn into_value(self) -> Value {
        Value::Simple(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    const KIND: ValueKind = ValueKind::Sequence;

    fn into_value(self) -> Value {
        Value::Sequence(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue + Clone> IntoValue for &[T] {
    const KIND: ValueKind = ValueKind::Sequence;

    fn into_value(self) -> Value {
        Value::Sequence(self.iter().cloned().map(IntoValue::into_value).collect())
    }
}

impl IntoValue for Composite {
    const KIND: ValueKind = ValueKind::Composite;

    fn into_value(self) -> Value {
        Value::Composite(self)
    }
}

/// Map key classification.
///
/// String key types make a map string-keyed; any other scalar key type makes
/// it object-keyed, with keys stringified when the map is flattened.
pub trait MapKey {
    /// Whether the key type is a string type.
    const STRING: bool;

    /// Convert the key into its scalar form.
    fn into_scalar(self) -> Scalar;
}

impl MapKey for String {
    const STRING: bool = true;

    fn into_scalar(self) -> Scalar {
        Scalar::Str(self)
    }
}

impl MapKey for &str {
    const STRING: bool = true;

    fn into_scalar(self) -> Scalar {
        Scalar::Str(self.to_owned())
    }
}

macro_rules! object_map_key {
    ($($t:ty),+ $(,)?) => {
        $(
            impl MapKey for $t {
                const STRING: bool = false;

                fn into_scalar(self) -> Scalar {
                    Scalar::from(self)
                }
            }
        )+
    };
}

object_map_key!(bool, i8, i16, i32, i64, u8, u16, u32, u64, char);

fn map_value<K, V>(string_keys: bool, entries: impl Iterator<Item = (K, V)>) -> Value
where
    K: MapKey,
    V: IntoValue,
{
    if string_keys {
        Value::StringMap(
            entries
                .map(|(k, v)| (k.into_scalar().to_string(), v.into_value()))
                .collect(),
        )
    } else {
        Value::ObjectMap(
            entries
                .map(|(k, v)| (k.into_scalar(), v.into_value()))
                .collect(),
        )
    }
}

impl<K, V> IntoValue for HashMap<K, V>
where
    K: MapKey + Eq + Hash,
    V: IntoValue,
{
    const KIND: ValueKind = if K::STRING {
        ValueKind::StringKeyedMap
    } else {
        ValueKind::ObjectKeyedMap
    };

    fn into_value(self) -> Value {
        map_value(K::STRING, self.into_iter())
    }
}

impl<K, V> IntoValue for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: IntoValue,
{
    const KIND: ValueKind = if K::STRING {
        ValueKind::StringKeyedMap
    } else {
        ValueKind::ObjectKeyedMap
    };

    fn into_value(self) -> Value {
        map_value(K::STRING, self.into_iter())
    }
}
