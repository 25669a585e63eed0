//! Wire codec: marshal native values to tagged attribute values and back.
//!
//! The wire model is the tagged union used by single-table key/value stores:
//! strings, decimal-string numbers, binary buffers, booleans, null, lists,
//! maps, and three homogeneous set kinds. [`marshal`] encodes a native
//! [`Value`] against a declared [`FieldType`]; [`unmarshal`] decodes without
//! type information, since the wire tag carries the kind.
//!
//! Coercion is strict and non-lossy. A value either converts transparently
//! (`"30"` to integer 30, integer 5 to decimal 5) or the operation fails
//! with a [`CodecError`] naming the field type and the offending value.
//! `"00"` is not the number zero, `1` is not `true`, and a fractional
//! decimal never silently truncates to an integer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;

use crate::schema::FieldType;
use crate::value::{Number, Value};

mod errors;

pub use errors::CodecError;

/// A wire-side attribute value, tagged by kind.
///
/// Serializes to the external single-letter tagging convention:
/// `{"s": "bar"}`, `{"n": "42"}`, `{"m": {...}}`, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeValue {
    /// String
    S(String),
    /// Number, always a canonical decimal string
    N(String),
    /// Binary
    B(ByteBuf),
    /// Boolean
    Bool(bool),
    /// Null
    Null,
    /// List of attribute values
    L(Vec<AttributeValue>),
    /// Map of attribute values
    M(BTreeMap<String, AttributeValue>),
    /// String set
    Ss(Vec<String>),
    /// Number set
    Ns(Vec<String>),
    /// Binary set
    Bs(Vec<ByteBuf>),
}

/// One attribute-level operation in a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "UPPERCASE")]
pub enum AttributeUpdate {
    /// Replace the attribute with the given value
    Put(AttributeValue),
    /// Remove the attribute from the item
    Delete,
}

/// Encode a native value against its declared field type.
///
/// `Value::Null` marshals to the wire null for every declared type. For
/// container types, top-level kind is checked against the declaration and
/// elements are encoded by their runtime kind via [`marshal_auto`].
pub fn marshal(field_type: FieldType, value: &Value) -> Result<AttributeValue, CodecError> {
    if value.is_null() {
        return Ok(AttributeValue::Null);
    }
    match field_type {
        FieldType::String => marshal_string(value),
        FieldType::Integer => marshal_integer(value),
        FieldType::Float => marshal_float(value),
        FieldType::Decimal => marshal_decimal(value),
        FieldType::Boolean => match value {
            Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
            other => Err(invalid(FieldType::Boolean, other)),
        },
        FieldType::Binary => match value {
            Value::Binary(bytes) => Ok(AttributeValue::B(ByteBuf::from(bytes.clone()))),
            other => Err(invalid(FieldType::Binary, other)),
        },
        FieldType::List => match value {
            Value::List(items) => {
                let encoded = items.iter().map(marshal_auto).collect::<Result<_, _>>()?;
                Ok(AttributeValue::L(encoded))
            }
            other => Err(invalid(FieldType::List, other)),
        },
        FieldType::Map => match value {
            Value::Map(entries) => marshal_map(entries),
            other => Err(invalid(FieldType::Map, other)),
        },
        FieldType::Set => marshal_set(value),
    }
}

/// Encode a native value by its runtime kind, with no declared type.
///
/// Used for elements inside lists and maps, where only the value itself
/// says what it is.
pub fn marshal_auto(value: &Value) -> Result<AttributeValue, CodecError> {
    match value {
        Value::Null => Ok(AttributeValue::Null),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Int(n) => Ok(AttributeValue::N(n.to_string())),
        Value::Float(f) => match Number::from_f64(*f) {
            Ok(n) => Ok(AttributeValue::N(n.as_str().to_string())),
            Err(_) => Err(invalid(FieldType::Float, value)),
        },
        Value::Decimal(n) => Ok(AttributeValue::N(n.as_str().to_string())),
        Value::Text(s) => Ok(AttributeValue::S(s.clone())),
        Value::Binary(bytes) => Ok(AttributeValue::B(ByteBuf::from(bytes.clone()))),
        Value::List(items) => {
            let encoded = items.iter().map(marshal_auto).collect::<Result<_, _>>()?;
            Ok(AttributeValue::L(encoded))
        }
        Value::Map(entries) => marshal_map(entries),
        Value::StringSet(members) => Ok(AttributeValue::Ss(members.iter().cloned().collect())),
        Value::NumberSet(members) => Ok(AttributeValue::Ns(
            members.iter().map(|n| n.as_str().to_string()).collect(),
        )),
        Value::BinarySet(members) => Ok(AttributeValue::Bs(
            members.iter().map(|b| ByteBuf::from(b.clone())).collect(),
        )),
    }
}

/// Decode a wire attribute value into its native form.
///
/// Numbers decode to `Int` when they fit an `i64` and to `Decimal`
/// otherwise; the exact decimal string is preserved either way.
pub fn unmarshal(attr: &AttributeValue) -> Result<Value, CodecError> {
    match attr {
        AttributeValue::S(s) => Ok(Value::Text(s.clone())),
        AttributeValue::N(repr) => unmarshal_number(repr),
        AttributeValue::B(bytes) => Ok(Value::Binary(bytes.clone().into_vec())),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null => Ok(Value::Null),
        AttributeValue::L(items) => {
            let decoded = items.iter().map(unmarshal).collect::<Result<_, _>>()?;
            Ok(Value::List(decoded))
        }
        AttributeValue::M(entries) => {
            let mut decoded = BTreeMap::new();
            for (key, attr) in entries {
                decoded.insert(key.clone(), unmarshal(attr)?);
            }
            Ok(Value::Map(decoded))
        }
        AttributeValue::Ss(members) => Ok(Value::StringSet(members.iter().cloned().collect())),
        AttributeValue::Ns(members) => {
            let mut decoded = BTreeSet::new();
            for repr in members {
                decoded.insert(parse_wire_number(repr)?);
            }
            Ok(Value::NumberSet(decoded))
        }
        AttributeValue::Bs(members) => Ok(Value::BinarySet(
            members.iter().map(|b| b.clone().into_vec()).collect(),
        )),
    }
}

/// Normalize a native value against a declared field type.
///
/// This is the assignment-time coercion: the value is marshaled and
/// unmarshaled, then narrowed back to the variant the declared type calls
/// for. `"30"` assigned to an integer field comes back as `Int(30)`;
/// `"00"` fails.
pub fn simple_attribute(field_type: FieldType, value: Value) -> Result<Value, CodecError> {
    let decoded = unmarshal(&marshal(field_type, &value)?)?;
    match (field_type, decoded) {
        (FieldType::Integer, Value::Decimal(n)) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => Err(CodecError::NotTransparentlyCoercible {
                field_type,
                value: n.as_str().to_string(),
            }),
        },
        (FieldType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
        (FieldType::Float, Value::Decimal(n)) => Ok(Value::Float(n.to_f64())),
        (FieldType::Decimal, Value::Int(i)) => Ok(Value::Decimal(Number::from_i64(i))),
        (_, decoded) => Ok(decoded),
    }
}

fn invalid(field_type: FieldType, value: &Value) -> CodecError {
    CodecError::InvalidValueType {
        field_type,
        actual: value.type_name(),
        value: value.to_string(),
    }
}

fn opaque(field_type: FieldType, value: &Value) -> CodecError {
    CodecError::NotTransparentlyCoercible {
        field_type,
        value: value.to_string(),
    }
}

fn marshal_string(value: &Value) -> Result<AttributeValue, CodecError> {
    match value {
        Value::Text(s) => Ok(AttributeValue::S(s.clone())),
        Value::Int(n) => Ok(AttributeValue::S(n.to_string())),
        Value::Decimal(n) => Ok(AttributeValue::S(n.as_str().to_string())),
        Value::Float(f) => match Number::from_f64(*f) {
            Ok(n) => Ok(AttributeValue::S(n.as_str().to_string())),
            Err(_) => Err(invalid(FieldType::String, value)),
        },
        other => Err(invalid(FieldType::String, other)),
    }
}

fn marshal_integer(value: &Value) -> Result<AttributeValue, CodecError> {
    match value {
        Value::Int(n) => Ok(AttributeValue::N(n.to_string())),
        Value::Decimal(n) => {
            if n.is_integral() {
                Ok(AttributeValue::N(n.as_str().to_string()))
            } else {
                Err(opaque(FieldType::Integer, value))
            }
        }
        Value::Text(s) => match Number::parse(s) {
            Ok(n) if n.is_integral() => Ok(AttributeValue::N(n.as_str().to_string())),
            _ => Err(opaque(FieldType::Integer, value)),
        },
        Value::Float(f) => match Number::from_f64(*f) {
            Ok(n) if n.is_integral() => Ok(AttributeValue::N(n.as_str().to_string())),
            Ok(_) => Err(opaque(FieldType::Integer, value)),
            Err(_) => Err(invalid(FieldType::Integer, value)),
        },
        other => Err(invalid(FieldType::Integer, other)),
    }
}

fn marshal_float(value: &Value) -> Result<AttributeValue, CodecError> {
    match value {
        Value::Float(f) => match Number::from_f64(*f) {
            Ok(n) => Ok(AttributeValue::N(n.as_str().to_string())),
            Err(_) => Err(invalid(FieldType::Float, value)),
        },
        Value::Int(i) => {
            let n = Number::from_i64(*i);
            if float_exact(&n) {
                Ok(AttributeValue::N(n.as_str().to_string()))
            } else {
                Err(opaque(FieldType::Float, value))
            }
        }
        Value::Decimal(n) => {
            if float_exact(n) {
                Ok(AttributeValue::N(n.as_str().to_string()))
            } else {
                Err(opaque(FieldType::Float, value))
            }
        }
        Value::Text(s) => match Number::parse(s) {
            Ok(n) if float_exact(&n) => Ok(AttributeValue::N(n.as_str().to_string())),
            _ => Err(opaque(FieldType::Float, value)),
        },
        other => Err(invalid(FieldType::Float, other)),
    }
}

/// True when the decimal survives a pass through `f64` unchanged, so a
/// later narrowing to `Float` loses nothing.
fn float_exact(n: &Number) -> bool {
    Number::from_f64(n.to_f64()).is_ok_and(|round_tripped| round_tripped == *n)
}

fn marshal_decimal(value: &Value) -> Result<AttributeValue, CodecError> {
    match value {
        Value::Decimal(n) => Ok(AttributeValue::N(n.as_str().to_string())),
        Value::Int(n) => Ok(AttributeValue::N(n.to_string())),
        Value::Float(f) => match Number::from_f64(*f) {
            Ok(n) => Ok(AttributeValue::N(n.as_str().to_string())),
            Err(_) => Err(invalid(FieldType::Decimal, value)),
        },
        Value::Text(s) => match Number::parse(s) {
            Ok(n) => Ok(AttributeValue::N(n.as_str().to_string())),
            Err(_) => Err(opaque(FieldType::Decimal, value)),
        },
        other => Err(invalid(FieldType::Decimal, other)),
    }
}

fn marshal_map(entries: &BTreeMap<String, Value>) -> Result<AttributeValue, CodecError> {
    let mut encoded = BTreeMap::new();
    for (key, value) in entries {
        encoded.insert(key.clone(), marshal_auto(value)?);
    }
    Ok(AttributeValue::M(encoded))
}

/// Encode a set-typed field.
///
/// Native set values encode directly. A plain list is accepted when all of
/// its members share one set-able kind; the member type is inferred from
/// the first element and duplicates collapse.
fn marshal_set(value: &Value) -> Result<AttributeValue, CodecError> {
    let items = match value {
        Value::StringSet(_) | Value::NumberSet(_) | Value::BinarySet(_) => {
            return marshal_auto(value);
        }
        Value::List(items) => items,
        other => return Err(invalid(FieldType::Set, other)),
    };
    let first = items.first().ok_or_else(|| CodecError::InvalidSet {
        reason: "cannot infer the member type of an empty set".to_string(),
    })?;
    match first {
        Value::Text(_) => {
            let mut members = BTreeSet::new();
            for item in items {
                match item {
                    Value::Text(s) => {
                        members.insert(s.clone());
                    }
                    other => return Err(mixed_set(other)),
                }
            }
            Ok(AttributeValue::Ss(members.into_iter().collect()))
        }
        Value::Int(_) | Value::Float(_) | Value::Decimal(_) => {
            let mut members = BTreeSet::new();
            for item in items {
                match item.as_number() {
                    Some(n) => {
                        members.insert(n);
                    }
                    None => return Err(mixed_set(item)),
                }
            }
            Ok(AttributeValue::Ns(
                members.into_iter().map(|n| n.as_str().to_string()).collect(),
            ))
        }
        Value::Binary(_) => {
            let mut members = BTreeSet::new();
            for item in items {
                match item {
                    Value::Binary(bytes) => {
                        members.insert(bytes.clone());
                    }
                    other => return Err(mixed_set(other)),
                }
            }
            Ok(AttributeValue::Bs(
                members.into_iter().map(ByteBuf::from).collect(),
            ))
        }
        other => Err(CodecError::InvalidSet {
            reason: format!(
                "set members must be strings, numbers, or binary, got {}",
                other.type_name()
            ),
        }),
    }
}

fn mixed_set(item: &Value) -> CodecError {
    CodecError::InvalidSet {
        reason: format!("mixed member types, got {}", item.type_name()),
    }
}

fn unmarshal_number(repr: &str) -> Result<Value, CodecError> {
    let number = parse_wire_number(repr)?;
    Ok(match number.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Decimal(number),
    })
}

fn parse_wire_number(repr: &str) -> Result<Number, CodecError> {
    Number::parse(repr).map_err(|_| CodecError::InvalidNumber {
        input: repr.to_string(),
    })
}
