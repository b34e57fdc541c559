//! Stored Value Module
//!
//! Scalar values accepted by [`StoredCache::store`](crate::cache::StoredCache::store).

use crate::instrument::{CallArgs, Repr};

// == Store Value ==
/// A text, binary, integer or floating-point value.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Text(String),
    Binary(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl StoreValue {
    /// Byte representation written to the store.
    ///
    /// Numbers are written as decimal text so the store can `incr` integers
    /// and the getters can parse them back. Floats always keep a fractional
    /// or exponent marker (`1.0`, not `1`).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoreValue::Text(text) => text.as_bytes().to_vec(),
            StoreValue::Binary(bytes) => bytes.clone(),
            StoreValue::Integer(n) => n.to_string().into_bytes(),
            StoreValue::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoreValue::Text(_) => "text",
            StoreValue::Binary(_) => "binary",
            StoreValue::Integer(_) => "integer",
            StoreValue::Float(_) => "float",
        }
    }
}

impl Repr for StoreValue {
    fn repr(&self) -> String {
        match self {
            StoreValue::Text(text) => text.repr(),
            StoreValue::Binary(bytes) => bytes.repr(),
            StoreValue::Integer(n) => n.repr(),
            StoreValue::Float(x) => x.repr(),
        }
    }
}

/// A bare value is a single positional argument.
impl CallArgs for StoreValue {
    fn positional(&self) -> Vec<String> {
        vec![self.repr()]
    }
}

// == Conversions ==
impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Text(value.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::Text(value)
    }
}

impl From<&[u8]> for StoreValue {
    fn from(value: &[u8]) -> Self {
        StoreValue::Binary(value.to_vec())
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(value: Vec<u8>) -> Self {
        StoreValue::Binary(value)
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        StoreValue::Integer(value)
    }
}

impl From<i32> for StoreValue {
    fn from(value: i32) -> Self {
        StoreValue::Integer(value.into())
    }
}

impl From<u32> for StoreValue {
    fn from(value: u32) -> Self {
        StoreValue::Integer(value.into())
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        StoreValue::Float(value)
    }
}
