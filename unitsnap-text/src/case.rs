//! Letter case transforms

use std::str::FromStr;
use unitsnap_core::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Upper,
    Lower,
    /// First letter of every whitespace-separated word upper, rest lower
    Title,
    /// First character of the whole text upper, rest lower
    Sentence,
}

impl TextCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
            Self::Title => title_case(text),
            Self::Sentence => capitalize(text),
        }
    }
}

impl FromStr for TextCase {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uppercase" => Ok(Self::Upper),
            "lowercase" => Ok(Self::Lower),
            "title" => Ok(Self::Title),
            "sentence" => Ok(Self::Sentence),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Apply the case named by `case`; an unrecognized name leaves the text as is
pub fn convert_text_case(text: &str, case: &str) -> String {
    match case.parse::<TextCase>() {
        Ok(case) => case.apply(text),
        Err(_) => text.to_string(),
    }
}
