//! Integer conversion between decimal, binary and hexadecimal text

use std::str::FromStr;
use unitsnap_core::{ConversionError, ConversionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Decimal,
    Binary,
    Hexadecimal,
}

impl NumberBase {
    pub fn radix(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Binary => 2,
            Self::Hexadecimal => 16,
        }
    }

    /// Parse trimmed text in this base. A single leading `-` is allowed;
    /// hex digits are case-insensitive.
    pub fn parse(self, input: &str) -> ConversionResult<i64> {
        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        // from_str_radix would also accept a leading '+'
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(self.radix())) {
            return Err(ConversionError::unparseable(format!(
                "'{}' is not a {} number",
                trimmed,
                self.name()
            )));
        }

        let too_large = || ConversionError::domain(format!("'{}' is too large", trimmed));
        let magnitude = u64::from_str_radix(digits, self.radix()).map_err(|_| too_large())?;
        // i64::MIN has no positive counterpart
        let value = if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        };
        value.ok_or_else(too_large)
    }

    /// Render without padding; negatives as `-` + magnitude, hex uppercase
    pub fn format(self, value: i64) -> String {
        let sign = if value < 0 { "-" } else { "" };
        let magnitude = value.unsigned_abs();
        match self {
            Self::Decimal => format!("{}{}", sign, magnitude),
            Self::Binary => format!("{}{:b}", sign, magnitude),
            Self::Hexadecimal => format!("{}{:X}", sign, magnitude),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Binary => "binary",
            Self::Hexadecimal => "hexadecimal",
        }
    }
}

impl FromStr for NumberBase {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decimal" => Ok(Self::Decimal),
            "binary" => Ok(Self::Binary),
            "hexadecimal" => Ok(Self::Hexadecimal),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

/// Re-render integer text from one base in another
pub fn convert_number_base(input: &str, from: &str, to: &str) -> ConversionResult<String> {
    let from: NumberBase = from.parse()?;
    let to: NumberBase = to.parse()?;
    Ok(to.format(from.parse(input)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_eq!(convert_number_base("FF", "hexadecimal", "decimal").unwrap(), "255");
        assert_eq!(convert_number_base("1010", "binary", "decimal").unwrap(), "10");
        assert_eq!(convert_number_base("255", "decimal", "hexadecimal").unwrap(), "FF");
        assert_eq!(convert_number_base("10", "decimal", "binary").unwrap(), "1010");
        assert_eq!(convert_number_base("ff", "hexadecimal", "binary").unwrap(), "11111111");
    }

    #[test]
    fn test_whitespace_and_sign() {
        assert_eq!(convert_number_base("  42 ", "decimal", "hexadecimal").unwrap(), "2A");
        assert_eq!(convert_number_base("-10", "decimal", "binary").unwrap(), "-1010");
        assert_eq!(convert_number_base("0", "decimal", "binary").unwrap(), "0");
    }

    #[test]
    fn test_rejects_bad_digits() {
        for (input, base) in [("", "decimal"), ("102", "binary"), ("G1", "hexadecimal"), ("+5", "decimal"), ("-", "decimal"), ("1.5", "decimal")] {
            let err = convert_number_base(input, base, "decimal").unwrap_err();
            assert_eq!(err.code(), "PARSE_ERROR", "input {:?}", input);
        }
    }

    #[test]
    fn test_overflow_is_domain_error() {
        let err = convert_number_base("FFFFFFFFFFFFFFFFFF", "hexadecimal", "decimal").unwrap_err();
        assert_eq!(err.code(), "DOMAIN_ERROR");
        let err = convert_number_base("8000000000000000", "hexadecimal", "decimal").unwrap_err();
        assert_eq!(err.code(), "DOMAIN_ERROR");
        let err = convert_number_base("-8000000000000001", "hexadecimal", "decimal").unwrap_err();
        assert_eq!(err.code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_most_negative_value() {
        assert_eq!(NumberBase::Hexadecimal.parse("-8000000000000000"), Ok(i64::MIN));
        assert_eq!(
            convert_number_base("-8000000000000000", "hexadecimal", "decimal").unwrap(),
            "-9223372036854775808"
        );
        assert_eq!(
            convert_number_base("-9223372036854775808", "decimal", "hexadecimal").unwrap(),
            "-8000000000000000"
        );
    }

    #[test]
    fn test_unknown_base() {
        assert_eq!(
            convert_number_base("7", "octal", "decimal"),
            Err(ConversionError::unknown_unit("octal"))
        );
        assert!(convert_number_base("7", "decimal", "octal").is_err());
    }

    proptest! {
        #[test]
        fn prop_bases_agree(n in -1_000_000_000i64..1_000_000_000) {
            let hex = NumberBase::Hexadecimal.format(n);
            let bin = convert_number_base(&hex, "hexadecimal", "binary").unwrap();
            prop_assert_eq!(NumberBase::Binary.parse(&bin).unwrap(), n);
        }
    }
}
