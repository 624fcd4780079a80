//! Roman numerals

use unitsnap_core::{ConversionError, ConversionResult};

/// Largest value with a standard Roman form
pub const MAX_ROMAN: i64 = 3999;

const ROMAN_TABLE: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

fn symbol_value(c: char) -> Option<i64> {
    match c {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Encode an integer in `1..=3999` by greedy subtraction
pub fn decimal_to_roman(num: i64) -> ConversionResult<String> {
    if !(1..=MAX_ROMAN).contains(&num) {
        return Err(ConversionError::domain(format!(
            "{} is outside 1-{}",
            num, MAX_ROMAN
        )));
    }

    let mut remaining = num;
    let mut roman = String::new();
    for (value, symbol) in ROMAN_TABLE {
        while remaining >= value {
            roman.push_str(symbol);
            remaining -= value;
        }
    }
    Ok(roman)
}

/// Decode a numeral. Input is case-insensitive and must be in canonical
/// form: `IIII`, `VX` and `IC` are rejected.
pub fn roman_to_decimal(roman: &str) -> ConversionResult<i64> {
    let upper = roman.trim().to_uppercase();
    if upper.is_empty() {
        return Err(ConversionError::unparseable("empty Roman numeral"));
    }

    let values = upper
        .chars()
        .map(|c| {
            symbol_value(c)
                .ok_or_else(|| ConversionError::unparseable(format!("'{}' is not a Roman numeral symbol", c)))
        })
        .collect::<ConversionResult<Vec<_>>>()?;

    let mut total = 0;
    for (i, &current) in values.iter().enumerate() {
        match values.get(i + 1) {
            Some(&next) if current < next => total -= current,
            _ => total += current,
        }
    }

    match decimal_to_roman(total) {
        Ok(canonical) if canonical == upper => Ok(total),
        _ => Err(ConversionError::unparseable(format!("'{}' is not a canonical Roman numeral", roman.trim()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(decimal_to_roman(1994).unwrap(), "MCMXCIV");
        assert_eq!(decimal_to_roman(4).unwrap(), "IV");
        assert_eq!(decimal_to_roman(3999).unwrap(), "MMMCMXCIX");
    }

    #[test]
    fn test_encode_out_of_range() {
        assert_eq!(decimal_to_roman(0).unwrap_err().code(), "DOMAIN_ERROR");
        assert_eq!(decimal_to_roman(4000).unwrap_err().code(), "DOMAIN_ERROR");
        assert!(decimal_to_roman(-1).is_err());
    }

    #[test]
    fn test_decode() {
        assert_eq!(roman_to_decimal("MCMXCIV").unwrap(), 1994);
        assert_eq!(roman_to_decimal("mmxxiv").unwrap(), 2024);
        assert_eq!(roman_to_decimal(" XL ").unwrap(), 40);
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        for input in ["IIII", "VX", "IC", "MMMM", ""] {
            let err = roman_to_decimal(input).unwrap_err();
            assert_eq!(err.code(), "PARSE_ERROR", "input {:?}", input);
        }
    }

    #[test]
    fn test_decode_rejects_unknown_symbols() {
        assert!(matches!(roman_to_decimal("XIZ"), Err(ConversionError::Unparseable(_))));
    }

    #[test]
    fn test_every_value_round_trips() {
        for n in 1..=MAX_ROMAN {
            let roman = decimal_to_roman(n).unwrap();
            assert_eq!(roman_to_decimal(&roman).unwrap(), n);
        }
    }
}
