//! UnitSnap Core - Fundamental types
//!
//! This crate provides the core types used throughout UnitSnap:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `ConversionError`: Typed failure of a single conversion
//! - `SnapError`: Structured errors for dynamic callers
//! - Number parsing and display formatting

mod error;
pub mod number;
mod value;

pub use error::{codes, ConversionError, ConversionResult, SnapError};
pub use number::{format_number, parse_number, round_to_significant, whole_number, DEFAULT_PRECISION};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ConversionError, ConversionResult, SnapError, Value};
}
