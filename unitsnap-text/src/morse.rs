//! International Morse code for letters, digits and word gaps

use unitsnap_core::{ConversionError, ConversionResult};

const MORSE_TABLE: [(char, &str); 37] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    (' ', "/"),
];

fn encode_char(c: char) -> Option<&'static str> {
    let upper = c.to_ascii_uppercase();
    MORSE_TABLE.iter().find(|(k, _)| *k == upper).map(|(_, code)| *code)
}

fn decode_code(code: &str) -> Option<char> {
    MORSE_TABLE.iter().find(|(_, v)| *v == code).map(|(c, _)| *c)
}

/// Encode text, one code per character separated by single spaces.
/// Characters without a code are dropped.
pub fn text_to_morse(text: &str) -> String {
    text.chars().filter_map(encode_char).collect::<Vec<_>>().join(" ")
}

/// Decode space-separated codes; `/` is a word gap. Unknown codes are
/// dropped.
pub fn morse_to_text(morse: &str) -> String {
    morse.split_whitespace().filter_map(decode_code).collect()
}

/// Like [`text_to_morse`], but fails listing the characters without a code
pub fn text_to_morse_strict(text: &str) -> ConversionResult<String> {
    let unmapped: Vec<String> = text
        .chars()
        .filter(|c| encode_char(*c).is_none())
        .map(|c| format!("'{}'", c))
        .collect();
    if !unmapped.is_empty() {
        return Err(ConversionError::unparseable(format!(
            "no Morse code for {}",
            unmapped.join(", ")
        )));
    }
    Ok(text_to_morse(text))
}

/// Like [`morse_to_text`], but fails listing the unknown codes
pub fn morse_to_text_strict(morse: &str) -> ConversionResult<String> {
    let unknown: Vec<&str> = morse.split_whitespace().filter(|code| decode_code(code).is_none()).collect();
    if !unknown.is_empty() {
        return Err(ConversionError::unparseable(format!(
            "unknown Morse codes: {}",
            unknown.join(" ")
        )));
    }
    Ok(morse_to_text(morse))
}
