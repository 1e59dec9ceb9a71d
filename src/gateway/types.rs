// src/gateway/types.rs
//! Value and error types for remote attribute access

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scalar value carried by a device attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl AttributeValue {
    /// Integer view of the value. Floats are accepted only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            AttributeValue::Bool(b) => Some(i64::from(b)),
            AttributeValue::Int(i) => Some(i),
            AttributeValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
            AttributeValue::Float(_) => None,
        }
    }

    /// Non-negative integer view, used for counts and buffer indices
    pub fn as_usize(&self) -> Option<usize> {
        self.as_i64().and_then(|i| usize::try_from(i).ok())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

/// Errors raised by an attribute gateway
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Invalid range [{start}, {end}) for attribute '{attribute}'")]
    InvalidRange {
        attribute: String,
        start: usize,
        end: usize,
    },

    #[error("Short read on '{attribute}': requested {requested} values, received {received}")]
    ShortRead {
        attribute: String,
        requested: usize,
        received: usize,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}
