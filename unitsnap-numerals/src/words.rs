//! English number words ("one hundred twenty three" <-> 123)

use unitsnap_core::{ConversionError, ConversionResult};

/// Largest magnitude spelled out by [`number_to_words`]
pub const MAX_WORDS: i64 = 999_999_999;

const ONES: [&str; 10] = ["", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];
const TEENS: [&str; 10] = [
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];
const TENS: [&str; 10] = ["", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety"];

/// Words for 1..=999; empty for 0
fn chunk_words(n: i64) -> String {
    let n = n as usize;
    match n {
        0 => String::new(),
        1..=9 => ONES[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        20..=99 => match n % 10 {
            0 => TENS[n / 10].to_string(),
            ones => format!("{} {}", TENS[n / 10], ONES[ones]),
        },
        _ => match n % 100 {
            0 => format!("{} hundred", ONES[n / 100]),
            rest => format!("{} hundred {}", ONES[n / 100], chunk_words(rest as i64)),
        },
    }
}

/// Spell out an integer with |n| up to 999,999,999
pub fn number_to_words(num: i64) -> ConversionResult<String> {
    if num == 0 {
        return Ok("zero".to_string());
    }
    if num.unsigned_abs() > MAX_WORDS as u64 {
        return Err(ConversionError::domain(format!("{} is too large to spell out", num)));
    }
    if num < 0 {
        return Ok(format!("negative {}", number_to_words(-num)?));
    }

    let mut parts = Vec::new();
    let mut rest = num;
    for (scale, name) in [(1_000_000, "million"), (1_000, "thousand")] {
        if rest >= scale {
            parts.push(format!("{} {}", chunk_words(rest / scale), name));
            rest %= scale;
        }
    }
    if rest > 0 {
        parts.push(chunk_words(rest));
    }
    Ok(parts.join(" "))
}

fn word_value(word: &str) -> Option<i64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        "hundred" => 100,
        "thousand" => 1_000,
        "million" => 1_000_000,
        _ => return None,
    };
    Some(value)
}

/// Read English number words back into an integer.
///
/// Scales flush the running group into the total; "hundred" multiplies
/// the running group. Grammar is not otherwise checked, so
/// "two two" reads as 4.
pub fn words_to_number(words: &str) -> ConversionResult<i64> {
    let lower = words.trim().to_lowercase();
    if lower.is_empty() {
        return Err(ConversionError::unparseable("empty input"));
    }

    let mut result: i64 = 0;
    let mut current: i64 = 0;
    for word in lower.split_whitespace() {
        let value = word_value(word)
            .ok_or_else(|| ConversionError::unparseable(format!("'{}' is not a number word", word)))?;
        match value {
            1_000.. => {
                result = current
                    .checked_mul(value)
                    .and_then(|v| result.checked_add(v))
                    .ok_or_else(|| ConversionError::domain("number is too large"))?;
                current = 0;
            }
            100 => {
                current = current
                    .checked_mul(100)
                    .ok_or_else(|| ConversionError::domain("number is too large"))?;
            }
            _ => {
                current = current
                    .checked_add(value)
                    .ok_or_else(|| ConversionError::domain("number is too large"))?;
            }
        }
    }
    result
        .checked_add(current)
        .ok_or_else(|| ConversionError::domain("number is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_out() {
        assert_eq!(number_to_words(0).unwrap(), "zero");
        assert_eq!(number_to_words(7).unwrap(), "seven");
        assert_eq!(number_to_words(15).unwrap(), "fifteen");
        assert_eq!(number_to_words(40).unwrap(), "forty");
        assert_eq!(number_to_words(123).unwrap(), "one hundred twenty three");
        assert_eq!(number_to_words(1_000_000).unwrap(), "one million");
        assert_eq!(number_to_words(2_005_300).unwrap(), "two million five thousand three hundred");
        assert_eq!(number_to_words(-42).unwrap(), "negative forty two");
    }

    #[test]
    fn test_spell_out_limit() {
        assert_eq!(
            number_to_words(999_999_999).unwrap(),
            "nine hundred ninety nine million nine hundred ninety nine thousand nine hundred ninety nine"
        );
        assert_eq!(number_to_words(1_000_000_000).unwrap_err().code(), "DOMAIN_ERROR");
        assert!(number_to_words(-1_000_000_000).is_err());
        assert!(number_to_words(i64::MIN).is_err());
    }

    #[test]
    fn test_read_words() {
        assert_eq!(words_to_number("one million").unwrap(), 1_000_000);
        assert_eq!(words_to_number("Twenty  One").unwrap(), 21);
        assert_eq!(words_to_number("one hundred twenty three thousand four hundred five").unwrap(), 123_405);
        assert_eq!(words_to_number("zero").unwrap(), 0);
    }

    #[test]
    fn test_read_words_rejects_unknown() {
        assert_eq!(words_to_number("one and a half").unwrap_err().code(), "PARSE_ERROR");
        assert_eq!(words_to_number("   ").unwrap_err().code(), "PARSE_ERROR");
    }

    #[test]
    fn test_words_round_trip() {
        for n in [1, 19, 20, 99, 100, 101, 999, 1_001, 10_010, 700_000, 12_345_678, 999_999_999] {
            let words = number_to_words(n).unwrap();
            assert_eq!(words_to_number(&words).unwrap(), n, "{}", words);
        }
    }
}
