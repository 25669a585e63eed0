//! Native value types for document attributes.
//!
//! This module provides the [`Value`] enum that represents every attribute
//! value a document can hold in-process, before wire encoding. Scalars keep
//! their exact form: integers as `i64`, arbitrary-precision decimals as
//! [`Number`], and binary data as raw byte buffers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

mod errors;
mod number;
#[cfg(test)]
mod tests;

pub use errors::ValueError;
pub use number::Number;

/// A native attribute value.
///
/// `Value` covers the full set of types a document field can carry:
/// scalars (`Null`, `Bool`, `Int`, `Float`, `Decimal`, `Text`, `Binary`),
/// containers (`List`, `Map`), and the three homogeneous set kinds the
/// storage model supports.
///
/// # Numeric Equality
///
/// The three numeric variants compare by exact decimal value, not by
/// variant. `Int(5)`, `Float(5.0)`, and `Decimal("5")` are all equal. This
/// is what lets a value survive a marshal/unmarshal round trip (which
/// canonicalizes numbers to decimal strings) and still compare equal to the
/// original.
///
/// ```
/// # use dynadoc::value::{Number, Value};
/// assert_eq!(Value::Int(5), Value::Float(5.0));
/// assert_eq!(Value::Int(5), Value::Decimal(Number::from_i64(5)));
/// assert_ne!(Value::Int(5), Value::Text("5".to_string()));
/// ```
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// comparisons:
///
/// ```
/// # use dynadoc::value::Value;
/// let text = Value::Text("hello".to_string());
/// let number = Value::Int(42);
/// assert!(text == "hello");
/// assert!(number == 42);
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Null/absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit binary float
    Float(f64),
    /// Exact decimal, for values outside `i64`/`f64` fidelity
    Decimal(Number),
    /// UTF-8 text
    Text(String),
    /// Raw byte buffer
    Binary(Vec<u8>),
    /// Ordered collection of values
    List(Vec<Value>),
    /// String-keyed collection of values
    Map(BTreeMap<String, Value>),
    /// Set of unique strings
    StringSet(BTreeSet<String>),
    /// Set of unique exact decimals
    NumberSet(BTreeSet<Number>),
    /// Set of unique byte buffers
    BinarySet(BTreeSet<Vec<u8>>),
}

impl Value {
    /// Returns the type name as a string, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Binary(_) => "binary",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::StringSet(_) => "string set",
            Value::NumberSet(_) => "number set",
            Value::BinarySet(_) => "binary set",
        }
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for null, empty text, and empty containers.
    ///
    /// `Bool(false)` is NOT blank; presence checks special-case it.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            Value::List(l) => l.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::StringSet(s) => s.is_empty(),
            Value::NumberSet(s) => s.is_empty(),
            Value::BinarySet(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a byte slice
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Attempts to convert to a list (returns immutable reference)
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Attempts to convert to a map (returns immutable reference)
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The exact decimal denoted by this value, when it is numeric.
    ///
    /// Non-finite floats have no decimal form and return `None`.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::from_i64(*n)),
            Value::Float(f) => Number::from_f64(*f).ok(),
            Value::Decimal(n) => Some(n.clone()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // Numeric variants compare by exact decimal value.
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a == b;
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            // Only reached when at least one side has no decimal form
            // (non-finite floats); IEEE semantics apply.
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::StringSet(a), Value::StringSet(b)) => a == b,
            (Value::NumberSet(a), Value::NumberSet(b)) => a == b,
            (Value::BinarySet(a), Value::BinarySet(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::StringSet(s) => write!(f, "<string set, {} members>", s.len()),
            Value::NumberSet(s) => write!(f, "<number set, {} members>", s.len()),
            Value::BinarySet(s) => write!(f, "<binary set, {} members>", s.len()),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(value: BTreeSet<String>) -> Self {
        Value::StringSet(value)
    }
}

impl From<BTreeSet<Number>> for Value {
    fn from(value: BTreeSet<Number>) -> Self {
        Value::NumberSet(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_number()
            .is_some_and(|n| n == Number::from_i64(*other))
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self == &(*other as i64)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Bool(b) => b == other,
            _ => false,
        }
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
