//! Offset record value types
//!
//! This module defines:
//! - OffsetValue: scalar stored under an offset key
//! - OffsetMap: the flat key/value offset record handed to an offset store
//!
//! ## Offset Value Model
//!
//! An offset record is a flat mapping from string keys to scalars. Only two
//! scalar types exist:
//! - `String`: transaction identifiers
//! - `Int`: event counts and ordinals
//!
//! Different types are NEVER equal: `Int(1) != String("1")`. No implicit
//! coercion happens when decoding; a mistyped value is reported by whoever
//! interprets the key.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Flat key/value offset record
pub type OffsetMap = HashMap<String, OffsetValue>;

/// Scalar value stored in an offset record
///
/// Serialized untagged, so an offset record encodes as a plain JSON object
/// such as `{"transaction_id": "tx-1", "...orders": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetValue {
    /// 64-bit signed integer
    Int(i64),
    /// UTF-8 string
    String(String),
}

impl OffsetValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            OffsetValue::Int(_) => "Int",
            OffsetValue::String(_) => "String",
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OffsetValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OffsetValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for OffsetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetValue::Int(i) => write!(f, "{}", i),
            OffsetValue::String(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for OffsetValue {
    fn from(s: &str) -> Self {
        OffsetValue::String(s.to_string())
    }
}

impl From<String> for OffsetValue {
    fn from(s: String) -> Self {
        OffsetValue::String(s)
    }
}

impl From<i64> for OffsetValue {
    fn from(i: i64) -> Self {
        OffsetValue::Int(i)
    }
}

/// Counts above `i64::MAX` saturate.
impl From<u64> for OffsetValue {
    fn from(n: u64) -> Self {
        OffsetValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// JSON codec
// ============================================================================

/// Encode an offset record as a JSON object
///
/// Keys are written in sorted order so that identical records produce
/// identical bytes.
pub fn encode_offset_map(offset: &OffsetMap) -> Result<Vec<u8>> {
    let sorted: BTreeMap<&String, &OffsetValue> = offset.iter().collect();
    Ok(serde_json::to_vec(&sorted)?)
}

/// Decode an offset record from a JSON object
///
/// Fails with `Error::Serialization` if the input is not a JSON object or a
/// value is neither a string nor an integer in the `i64` range.
pub fn decode_offset_map(bytes: &[u8]) -> Result<OffsetMap> {
    Ok(serde_json::from_slice(bytes)?)
}
