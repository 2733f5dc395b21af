//! Core types for Strata CDC
//!
//! This crate defines the foundational types shared by the CDC crates:
//! - OffsetValue: scalar stored in an offset record (string or integer)
//! - OffsetMap: flat key/value offset record exchanged with offset stores
//! - Offset JSON codec: encode_offset_map / decode_offset_map
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod value;

pub use error::{Error, Result};
pub use value::{decode_offset_map, encode_offset_map, OffsetMap, OffsetValue};
