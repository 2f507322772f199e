//! JSON form of a stored value
//!
//! Values cross the HTTP boundary tagged with their type, so bytes and
//! strings (or ints and floats) stay distinct:
//!
//! ```json
//! {"type": "bytes", "value": [102, 111, 111]}
//! {"type": "int", "value": 123}
//! ```

use serde::{Deserialize, Serialize};

use crate::cache::Value;

/// Type-tagged value as carried in request and response bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    String(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl From<TypedValue> for Value {
    fn from(typed: TypedValue) -> Self {
        match typed {
            TypedValue::String(s) => Value::String(s),
            TypedValue::Bytes(b) => Value::Bytes(b),
            TypedValue::Int(i) => Value::Int(i),
            TypedValue::Float(f) => Value::Float(f),
        }
    }
}

impl From<Value> for TypedValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => TypedValue::String(s),
            Value::Bytes(b) => TypedValue::Bytes(b),
            Value::Int(i) => TypedValue::Int(i),
            Value::Float(f) => TypedValue::Float(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_value_deserialize() {
        let typed: TypedValue =
            serde_json::from_str(r#"{"type":"bytes","value":[102,111,111]}"#).unwrap();
        assert_eq!(Value::from(typed), Value::from(b"foo"));

        let typed: TypedValue = serde_json::from_str(r#"{"type":"int","value":123}"#).unwrap();
        assert_eq!(Value::from(typed), Value::Int(123));
    }

    #[test]
    fn test_typed_value_serialize() {
        let json = serde_json::to_string(&TypedValue::from(Value::from("bar"))).unwrap();
        assert_eq!(json, r#"{"type":"string","value":"bar"}"#);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<TypedValue, _> = serde_json::from_str(r#"{"type":"list","value":[]}"#);
        assert!(result.is_err());
    }
}
