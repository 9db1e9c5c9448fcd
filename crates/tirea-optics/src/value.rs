//! Shared, immutable document values.
//!
//! `Value` mirrors the shape of a JSON document, but its containers sit behind
//! `Arc` so that cloning a record or list is a reference-count bump. Writes
//! made through [`set`](crate::set) copy only the levels along the addressed
//! path; every other branch of the result is the same allocation as the input.

use serde_json::Number;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Record storage: string keys in sorted order.
pub type Record = BTreeMap<String, Value>;

/// A list slot. `None` is a hole left behind when a write vivifies past the
/// end of a list.
pub type Slot = Option<Value>;

/// A dynamically typed document value with structurally shared containers.
///
/// Equality (`==`) is deep. Use [`Value::ptr_eq`] to test whether two values
/// are the same underlying data.
///
/// # Examples
///
/// ```
/// use tirea_optics::Value;
/// use serde_json::json;
///
/// let doc = Value::from(json!({"user": {"name": "Alice"}}));
/// let copy = doc.clone();
/// assert!(doc.ptr_eq(&copy));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Null, also used for an absent target.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(Number),
    /// String scalar.
    String(Arc<str>),
    /// Ordered list of slots.
    List(Arc<Vec<Slot>>),
    /// String-keyed record.
    Record(Arc<Record>),
}

impl Value {
    /// Build a record from key/value pairs.
    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a list from slots. Use `None` for a hole.
    pub fn list<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Slot>,
    {
        Value::List(Arc::new(slots.into_iter().collect()))
    }

    /// Build a list with every slot filled.
    pub fn list_of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::list(values.into_iter().map(Some))
    }

    /// An empty record.
    #[inline]
    pub fn empty_record() -> Self {
        Value::Record(Arc::default())
    }

    /// An empty list.
    #[inline]
    pub fn empty_list() -> Self {
        Value::List(Arc::default())
    }

    /// Returns true for `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for a record.
    #[inline]
    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Returns true for a list.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Get the record if this is a record.
    #[inline]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(&**r),
            _ => None,
        }
    }

    /// Get the list slots if this is a list.
    #[inline]
    pub fn as_list(&self) -> Option<&[Slot]> {
        match self {
            Value::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    /// Get the string if this is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Get the boolean if this is a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the number as `i64` if it is an integer in range.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Get the number as `f64`.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Look up a record entry.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record()?.get(key)
    }

    /// Look up a filled list slot.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_list()?.get(index)?.as_ref()
    }

    /// Reference identity.
    ///
    /// Containers are identical when they share the same allocation; scalars
    /// are identical when they are equal.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::List(_) | Value::Record(_), _) | (_, Value::List(_) | Value::Record(_)) => {
                false
            }
            (a, b) => a == b,
        }
    }

    /// Name of this value's kind, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n.into())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::list_of(iter)
    }
}
