//! Typed scalar cache values
//!
//! Remote stores only hold text, so every value has a wire form. Typed reads
//! parse that wire form the same way regardless of backend, which keeps the
//! local and remote caches observably identical.

use crate::constants::{BOOL_FALSE_TEXT, BOOL_TRUE_TEXT};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scalar value stored in a cache backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, stored as "1" / "0"
    Bool(bool),
    /// Text value
    Text(String),
}

impl CacheValue {
    /// Text representation written to remote stores
    pub fn to_wire(&self) -> String {
        self.to_string()
    }

    /// Read as a 32-bit integer
    pub fn to_i32(&self) -> Result<i32> {
        match self {
            Self::Int(v) => i32::try_from(*v)
                .map_err(|e| Error::decode_with_source(format!("{v} does not fit in i32"), e)),
            _ => parse_wire(self),
        }
    }

    /// Read as a 64-bit integer
    pub fn to_i64(&self) -> Result<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => parse_wire(self),
        }
    }

    /// Read as a 32-bit float
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(&self) -> Result<f32> {
        match self {
            Self::Float(v) => Ok(*v as f32),
            _ => parse_wire(self),
        }
    }

    /// Read as a 64-bit float
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Self::Float(v) => Ok(*v),
            _ => parse_wire(self),
        }
    }

    /// Read as a boolean; only "1" and "0" are booleans
    pub fn to_bool(&self) -> Option<bool> {
        match self.to_wire().as_str() {
            BOOL_TRUE_TEXT => Some(true),
            BOOL_FALSE_TEXT => Some(false),
            _ => None,
        }
    }

    /// Read as text
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            other => other.to_wire(),
        }
    }
}

fn parse_wire<T>(value: &CacheValue) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let wire = value.to_wire();
    wire.parse::<T>().map_err(|e| {
        Error::decode_with_source(
            format!(
                "cannot read {wire:?} as {}",
                std::any::type_name::<T>()
            ),
            e,
        )
    })
}

impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(true) => f.write_str(BOOL_TRUE_TEXT),
            Self::Bool(false) => f.write_str(BOOL_FALSE_TEXT),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for CacheValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for CacheValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for CacheValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for CacheValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for CacheValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for CacheValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
