//! Record abstraction shared by every hierarchy operation.
//!
//! The engine never looks at field names it was not configured with. Anything
//! else a record carries is cloned through untouched.

use std::fmt::Debug;
use std::hash::Hash;

use serde_json::{Map, Value};

/// A field value that can act as an identifier or parent identifier.
pub trait FieldValue: Clone + PartialEq + Debug {
    /// Canonical identity used for equality and indexing.
    type Key: Hash + Eq + Clone + Debug;

    fn key(&self) -> Self::Key;

    /// True for values that do not name a parent (null, zero, empty).
    fn is_blank(&self) -> bool;

    /// Stand-in for a field the record does not carry.
    fn absent() -> Self;

    /// Human-readable rendering for diagnostics.
    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

/// A free-form mapping from field name to value.
pub trait Record: Clone + Debug {
    type Value: FieldValue;

    fn field(&self, name: &str) -> Option<&Self::Value>;

    fn set_field(&mut self, name: &str, value: Self::Value);

    /// Remove `name`, keeping the relative order of the remaining fields.
    fn remove_field(&mut self, name: &str) -> Option<Self::Value>;

    /// Wrap a children sequence into a single field value.
    fn children_value(children: Vec<Self>) -> Self::Value;

    /// Unwrap a children field. Values that are not sequences yield no children.
    fn children_from(value: Self::Value) -> Vec<Self>;

    fn level_value(level: usize) -> Self::Value;

    /// Copy-on-write update.
    fn with_field(&self, name: &str, value: Self::Value) -> Self {
        let mut copy = self.clone();
        copy.set_field(name, value);
        copy
    }

    /// Key of `name`, treating a missing field as [`FieldValue::absent`].
    fn field_key(&self, name: &str) -> <Self::Value as FieldValue>::Key {
        match self.field(name) {
            Some(value) => value.key(),
            None => Self::Value::absent().key(),
        }
    }
}

/// JSON object used as a record.
pub type JsonRecord = Map<String, Value>;

/// Canonical identity of a JSON value.
///
/// Integral numbers compare equal regardless of representation (`1`, `1.0`),
/// strings compare exactly, composite values compare by serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonKey {
    Null,
    Bool(bool),
    Int(i128),
    Float(u64),
    Str(String),
    Composite(String),
}

/// Largest float that still converts to `i128` without saturating.
const MAX_INTEGRAL_FLOAT: f64 = 1.0e30;

impl FieldValue for Value {
    type Key = JsonKey;

    fn key(&self) -> JsonKey {
        match self {
            Value::Null => JsonKey::Null,
            Value::Bool(flag) => JsonKey::Bool(*flag),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    JsonKey::Int(i128::from(int))
                } else if let Some(uint) = number.as_u64() {
                    JsonKey::Int(i128::from(uint))
                } else {
                    let float = number.as_f64().unwrap_or(f64::NAN);
                    if float.is_finite() && float.fract() == 0.0 && float.abs() < MAX_INTEGRAL_FLOAT
                    {
                        JsonKey::Int(float as i128)
                    } else {
                        JsonKey::Float(float.to_bits())
                    }
                }
            }
            Value::String(text) => JsonKey::Str(text.clone()),
            Value::Array(_) | Value::Object(_) => JsonKey::Composite(self.to_string()),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(flag) => !flag,
            Value::Number(number) => number.as_f64() == Some(0.0),
            Value::String(text) => text.is_empty() || text == "0",
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
        }
    }

    fn absent() -> Self {
        Value::Null
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Record for JsonRecord {
    type Value = Value;

    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.shift_remove(name)
    }

    fn children_value(children: Vec<Self>) -> Value {
        Value::Array(children.into_iter().map(Value::Object).collect())
    }

    fn children_from(value: Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(fields) => Some(fields),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn level_value(level: usize) -> Value {
        Value::from(level)
    }
}
