//! Numeric input parsing and display formatting
//!
//! All arithmetic in UnitSnap is plain `f64`. This module owns the two
//! edges: reading user-entered text as a number, and rendering a result
//! with a fixed number of significant digits.

use crate::{ConversionError, ConversionResult};

/// Default number of significant digits for displayed results
pub const DEFAULT_PRECISION: u32 = 6;

/// Magnitude at which results switch to exponential notation
pub const EXPONENTIAL_THRESHOLD: f64 = 1_000_000.0;

/// Magnitudes below this render in exponential notation
const SMALL_THRESHOLD: f64 = 1e-6;

/// Fraction digits used for large exponential results
const EXPONENTIAL_DIGITS: usize = 3;

/// Parse user-entered text as a finite number.
///
/// Leading and trailing whitespace is ignored. Empty input, trailing
/// garbage and non-finite values (`inf`, `NaN`) are rejected.
pub fn parse_number(input: &str) -> ConversionResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::unparseable("empty input"));
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ConversionError::unparseable(format!("'{}' is not a number", trimmed))),
    }
}

/// Whole number from a parsed value. Fractions are truncated toward zero;
/// magnitudes outside `i64` are a domain error.
pub fn whole_number(n: f64) -> ConversionResult<i64> {
    if !n.is_finite() || n.abs() >= i64::MAX as f64 {
        return Err(ConversionError::domain(format!("{} is too large", n)));
    }
    Ok(n.trunc() as i64)
}

/// Round to `precision` significant digits. `None` for NaN and infinities.
pub fn round_to_significant(num: f64, precision: u32) -> Option<f64> {
    if !num.is_finite() {
        return None;
    }
    // f64 carries at most 17 meaningful decimal digits
    let digits = precision.clamp(1, 17) as usize;
    format!("{:.*e}", digits - 1, num).parse::<f64>().ok()
}

/// Render a result for display.
///
/// Rounds to `precision` significant digits and strips insignificant
/// trailing zeros. Magnitudes of one million and above render as
/// `1.235e+6`; tiny magnitudes use the shortest exponential form.
/// Returns `None` for NaN and infinities, never the string "NaN".
pub fn format_number(num: f64, precision: u32) -> Option<String> {
    let rounded = round_to_significant(num, precision)?;
    if rounded == 0.0 {
        return Some("0".to_string());
    }

    let magnitude = rounded.abs();
    let text = if magnitude >= EXPONENTIAL_THRESHOLD {
        with_signed_exponent(format!("{:.*e}", EXPONENTIAL_DIGITS, rounded))
    } else if magnitude < SMALL_THRESHOLD {
        with_signed_exponent(format!("{:e}", rounded))
    } else {
        format!("{}", rounded)
    };
    Some(text)
}

/// `1.5e6` -> `1.5e+6`; negative exponents are left alone
fn with_signed_exponent(text: String) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}
