//! Value Module
//!
//! Defines the scalar-or-bytes values a cache entry can hold.

use std::borrow::Cow;
use std::fmt;

// == Value ==
/// A stored value: UTF-8 text, raw bytes, a 64-bit integer or a double.
///
/// Variants are never coerced into each other on storage. `Int(1)` and
/// `Float(1.0)` are different values, as are `String("abc")` and
/// `Bytes(b"abc")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 encoded string
    String(String),
    /// Arbitrary binary data
    Bytes(Vec<u8>),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit IEEE-754 floating point
    Float(f64),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
        }
    }

    // == Wire Form ==
    /// Returns the byte rendering a byte-oriented backend would hold.
    ///
    /// Integers render as base-10 text and floats as the shortest decimal
    /// text that parses back to the same `f64`.
    pub fn to_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Value::String(s) => Cow::Borrowed(s.as_bytes()),
            Value::Bytes(b) => Cow::Borrowed(b.as_slice()),
            Value::Int(i) => Cow::Owned(i.to_string().into_bytes()),
            Value::Float(f) => Cow::Owned(f.to_string().into_bytes()),
        }
    }

    /// Consumes the value, returning its wire form.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Value::String(s) => s.into_bytes(),
            Value::Bytes(b) => b,
            other => other.to_bytes().into_owned(),
        }
    }
}

/// Human-readable repr used in call history.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
        }
    }
}

// == Conversions ==
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
