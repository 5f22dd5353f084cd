//! Datapoint value model.
//!
//! # Design
//!
//! The external broker speaks many scalar widths (int8 … uint64, float,
//! double).  Internally a single `Value` enum with the widest lane per
//! family (`i64`, `u64`, `f64`) is enough: the declared [`DataType`] of a
//! datapoint is kept next to its value and every write is coerced back to
//! the declared kind via [`DataType::coerce`], so narrowing happens in
//! exactly one place.
//!
//! `Bool` and `String` are *discrete* kinds: they can be set but never
//! animated (no meaningful linear interpolation).

use std::fmt;

// ── DataType ──────────────────────────────────────────────────────────────────

/// The declared scalar kind of a datapoint, resolved once from broker
/// metadata at load time and immutable thereafter.
///
/// `Unknown` marks a datapoint that is only *referenced* (by a condition or
/// a `$path` expression) and was never resolved against metadata.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float,
    Double,
    String,
    Unknown,
}

impl DataType {
    /// Discrete kinds cannot be animated — there is no meaningful
    /// interpolation between two strings or two booleans.
    #[inline]
    pub fn is_discrete(self) -> bool {
        matches!(self, DataType::Bool | DataType::String)
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DataType::Int32
                | DataType::Int64
                | DataType::Uint32
                | DataType::Uint64
                | DataType::Float
                | DataType::Double
        )
    }

    /// Coerce `value` to this declared kind.
    ///
    /// Numeric kinds accept any numeric value (float→integer rounds to
    /// nearest, unsigned saturates at 0).  Discrete and `Unknown` kinds
    /// pass the value through unchanged — mismatches there are declaration
    /// bugs caught by the loader, not something to paper over at runtime.
    pub fn coerce(self, value: Value) -> Value {
        match self {
            DataType::Int32 | DataType::Int64 => match value.as_f64() {
                Some(f) => Value::Int(f.round() as i64),
                None => value,
            },
            DataType::Uint32 | DataType::Uint64 => match value.as_f64() {
                Some(f) => Value::Uint(f.round().max(0.0) as u64),
                None => value,
            },
            DataType::Float | DataType::Double => match value.as_f64() {
                Some(f) => Value::Float(f),
                None => value,
            },
            DataType::Bool | DataType::String | DataType::Unknown => value,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Uint32 => "uint32",
            DataType::Uint64 => "uint64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

// ── Value ─────────────────────────────────────────────────────────────────────

/// An opaque typed datapoint value.
///
/// Equality is *value* equality (`PartialEq`); the change-notification hook
/// fires only when a write actually changes the value.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl Value {
    /// Numeric view for interpolation.  `None` for discrete values.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Uint(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(_) | Value::String(_) => None,
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
        }
    }
}

// ── Conversions from common Rust scalars ──────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
