//! UnitSnap Numerals - integer notations
//!
//! Converts whole numbers between notations:
//! - Positional bases (decimal, binary, hexadecimal)
//! - Roman numerals (1 to 3999, canonical form only)
//! - English words (up to 999,999,999 in magnitude)

mod base;
mod functions;
mod roman;
mod words;

pub use base::{convert_number_base, NumberBase};
pub use roman::{decimal_to_roman, roman_to_decimal, MAX_ROMAN};
pub use words::{number_to_words, words_to_number, MAX_WORDS};

use unitsnap_plugin::PluginRegistry;

/// Load numeral functions into registry
pub fn load_numerals_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::ConvertBase)
        .with_function(functions::ToRoman)
        .with_function(functions::FromRoman)
        .with_function(functions::ToWords)
        .with_function(functions::FromWords)
}
