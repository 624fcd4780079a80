//! Structured errors
//!
//! Errors never crash the system. Engine functions return a typed
//! [`ConversionError`]; dynamic callers receive a [`SnapError`] value that
//! carries a machine-readable code and an optional hint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Failure of a single conversion.
///
/// The three kinds are reported uniformly to end users, but kept apart so
/// callers and tests can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Unit or selector key not present in the relevant enumeration or table
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Input text cannot be read as the expected form
    #[error("cannot parse input: {0}")]
    Unparseable(String),

    /// Input is well-formed but outside the valid domain
    #[error("out of domain: {0}")]
    Domain(String),
}

impl ConversionError {
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        Self::UnknownUnit(unit.into())
    }

    pub fn unparseable(details: impl Into<String>) -> Self {
        Self::Unparseable(details.into())
    }

    pub fn domain(details: impl Into<String>) -> Self {
        Self::Domain(details.into())
    }

    /// Machine-readable code matching [`codes`]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            Self::Unparseable(_) => codes::PARSE_ERROR,
            Self::Domain(_) => codes::DOMAIN_ERROR,
        }
    }
}

/// Result alias for engine functions
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Structured error value handed to dynamic callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SnapError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_unit(unit: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", unit))
            .with_suggestion("Use list_converters() to see the units of each converter")
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help() to list available functions")
    }

    pub fn not_found(what: &str, name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No {} named '{}'", what, name))
    }

    pub fn storage(details: impl Into<String>) -> Self {
        Self::new(codes::STORAGE_ERROR, format!("Storage error: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
    }
}

impl std::fmt::Display for SnapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for SnapError {}

impl From<ConversionError> for SnapError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownUnit(unit) => Self::unknown_unit(&unit),
            ConversionError::Unparseable(details) => Self::parse_error(details),
            ConversionError::Domain(details) => Self::domain_error(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_codes() {
        assert_eq!(ConversionError::unknown_unit("parsec").code(), codes::UNKNOWN_UNIT);
        assert_eq!(ConversionError::unparseable("xyz").code(), codes::PARSE_ERROR);
        assert_eq!(ConversionError::domain("zero").code(), codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_into_snap_error_keeps_kind() {
        let err: SnapError = ConversionError::unknown_unit("furlong").into();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert!(err.message.contains("furlong"));
        assert!(err.suggestion.is_some());

        let err: SnapError = ConversionError::domain("roman numerals cover 1-3999").into();
        assert_eq!(err.code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_display() {
        let err = SnapError::arg_count("convert", 4, 1);
        let text = err.to_string();
        assert!(text.starts_with("[ARG_COUNT] convert() expects 4 arguments, got 1"));
        assert!(text.contains("suggestion"));
    }
}
