//! Argument extraction shared by function plugins

use unitsnap_core::{parse_number, SnapError, Value};

/// Fail with `ARG_COUNT` unless at least `expected` arguments are present
pub fn require_args(args: &[Value], expected: usize, func: &str) -> Result<(), SnapError> {
    if args.len() < expected {
        return Err(SnapError::arg_count(func, expected, args.len()));
    }
    Ok(())
}

/// Extract text, propagating error values
pub fn require_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, SnapError> {
    match value {
        Value::Text(s) => Ok(s.as_str()),
        Value::Error(e) => Err(e.clone()),
        other => Err(SnapError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Extract a number. Numeric text is accepted so raw user input can be
/// passed straight through.
pub fn require_number(value: &Value, func: &str, arg: &str) -> Result<f64, SnapError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => parse_number(s).map_err(SnapError::from),
        Value::Error(e) => Err(e.clone()),
        other => Err(SnapError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Raw input as text: numbers are rendered without formatting loss
pub fn require_raw(value: &Value, func: &str, arg: &str) -> Result<String, SnapError> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Number(n) => Ok(format!("{}", n)),
        Value::Error(e) => Err(e.clone()),
        other => Err(SnapError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Optional number at `index`; missing or null yields `None`
pub fn optional_number(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<f64>, SnapError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => require_number(v, func, arg).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_args() {
        assert!(require_args(&[Value::Null], 1, "f").is_ok());
        let err = require_args(&[], 2, "f").unwrap_err();
        assert_eq!(err.code, "ARG_COUNT");
    }

    #[test]
    fn test_require_number_accepts_numeric_text() {
        assert_eq!(require_number(&Value::from("12.5"), "f", "x").unwrap(), 12.5);
        assert_eq!(require_number(&Value::Number(3.0), "f", "x").unwrap(), 3.0);
        assert_eq!(require_number(&Value::from("abc"), "f", "x").unwrap_err().code, "PARSE_ERROR");
        assert_eq!(require_number(&Value::Bool(true), "f", "x").unwrap_err().code, "ARG_TYPE");
    }

    #[test]
    fn test_require_raw() {
        assert_eq!(require_raw(&Value::Number(255.0), "f", "x").unwrap(), "255");
        assert_eq!(require_raw(&Value::from("FF"), "f", "x").unwrap(), "FF");
    }

    #[test]
    fn test_optional_number() {
        let args = [Value::Null, Value::Number(20.0)];
        assert_eq!(optional_number(&args, 0, "f", "x").unwrap(), None);
        assert_eq!(optional_number(&args, 1, "f", "x").unwrap(), Some(20.0));
        assert_eq!(optional_number(&args, 5, "f", "x").unwrap(), None);
    }
}
