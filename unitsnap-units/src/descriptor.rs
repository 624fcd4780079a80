//! Converter descriptors: identity, kind and units of one convertible quantity

use serde::Serialize;
use std::fmt;
use unitsnap_core::{ConversionError, ConversionResult};

/// One unit of a linear converter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitDef {
    /// Selector key (e.g. "kilometer")
    pub key: &'static str,
    /// Display name (e.g. "Kilometer (km)")
    pub name: &'static str,
    /// Scale relative to the table's implicit base unit; always positive
    pub factor: f64,
}

impl UnitDef {
    pub const fn new(key: &'static str, name: &'static str, factor: f64) -> Self {
        Self { key, name, factor }
    }
}

/// Ordered unit table of a linear converter.
///
/// Order is significant: it is the order units are offered to the user,
/// and quick comparisons use the first entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UnitTable {
    units: Vec<UnitDef>,
}

impl UnitTable {
    pub fn new(units: Vec<UnitDef>) -> Self {
        Self { units }
    }

    pub fn get(&self, key: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.key == key)
    }

    /// Scale factor of `key`, or `UnknownUnit`
    pub fn factor(&self, key: &str) -> ConversionResult<f64> {
        self.get(key)
            .map(|u| u.factor)
            .ok_or_else(|| ConversionError::unknown_unit(key))
    }

    /// Display name of `key`, falling back to the key itself
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map_or(key, |u| u.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitDef> {
        self.units.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.units.iter().map(|u| u.key)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// A selectable option for a converter's from/to selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitOption {
    pub key: &'static str,
    pub name: &'static str,
}

const fn opt(key: &'static str, name: &'static str) -> UnitOption {
    UnitOption { key, name }
}

static TEMPERATURE_OPTIONS: [UnitOption; 3] = [
    opt("celsius", "Celsius (°C)"),
    opt("fahrenheit", "Fahrenheit (°F)"),
    opt("kelvin", "Kelvin (K)"),
];

static NUMBER_BASE_OPTIONS: [UnitOption; 3] = [
    opt("decimal", "Decimal"),
    opt("binary", "Binary"),
    opt("hexadecimal", "Hexadecimal"),
];

static FUEL_ECONOMY_OPTIONS: [UnitOption; 4] = [
    opt("km-per-liter", "km/L"),
    opt("mpg-us", "MPG (US)"),
    opt("mpg-uk", "MPG (UK)"),
    opt("liter-per-100km", "L/100km"),
];

static TYPOGRAPHY_OPTIONS: [UnitOption; 3] = [
    opt("px", "Pixels (px)"),
    opt("rem", "REM"),
    opt("em", "EM"),
];

static ROMAN_OPTIONS: [UnitOption; 2] = [
    opt("decimal", "Decimal (1-3999)"),
    opt("roman", "Roman Numeral"),
];

static TEXT_CASE_OPTIONS: [UnitOption; 4] = [
    opt("uppercase", "UPPERCASE"),
    opt("lowercase", "lowercase"),
    opt("title", "Title Case"),
    opt("sentence", "Sentence case"),
];

static ENCODING_OPTIONS: [UnitOption; 4] = [
    opt("base64-encode", "Base64 Encode"),
    opt("base64-decode", "Base64 Decode"),
    opt("url-encode", "URL Encode"),
    opt("url-decode", "URL Decode"),
];

static COLOR_OPTIONS: [UnitOption; 3] = [
    opt("hex", "HEX (#RRGGBB)"),
    opt("rgb", "RGB (r, g, b)"),
    opt("hsl", "HSL (h, s%, l%)"),
];

static NUMERALS_OPTIONS: [UnitOption; 2] = [opt("number", "Number"), opt("words", "Words")];

static MORSE_OPTIONS: [UnitOption; 2] = [opt("text", "Text"), opt("morse", "Morse Code")];

/// Conversion family of a converter.
///
/// Only linear converters carry data; every other family has a fixed,
/// built-in set of selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ConverterKind {
    Linear { units: UnitTable },
    Temperature,
    NumberBase,
    FuelEconomy,
    Typography,
    RomanNumerals,
    TextCase,
    Encoding,
    Color,
    Numerals,
    MorseCode,
}

impl ConverterKind {
    /// Kebab-case type name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "linear",
            Self::Temperature => "temperature",
            Self::NumberBase => "number-base",
            Self::FuelEconomy => "fuel-economy",
            Self::Typography => "typography",
            Self::RomanNumerals => "roman-numerals",
            Self::TextCase => "text-case",
            Self::Encoding => "encoding",
            Self::Color => "color",
            Self::Numerals => "numerals",
            Self::MorseCode => "morse-code",
        }
    }

    pub fn units(&self) -> Option<&UnitTable> {
        match self {
            Self::Linear { units } => Some(units),
            _ => None,
        }
    }

    /// Selector options, from the unit table or the family's fixed set
    pub fn unit_options(&self) -> Vec<UnitOption> {
        let fixed: &[UnitOption] = match self {
            Self::Linear { units } => {
                return units.iter().map(|u| UnitOption { key: u.key, name: u.name }).collect();
            }
            Self::Temperature => &TEMPERATURE_OPTIONS,
            Self::NumberBase => &NUMBER_BASE_OPTIONS,
            Self::FuelEconomy => &FUEL_ECONOMY_OPTIONS,
            Self::Typography => &TYPOGRAPHY_OPTIONS,
            Self::RomanNumerals => &ROMAN_OPTIONS,
            Self::TextCase => &TEXT_CASE_OPTIONS,
            Self::Encoding => &ENCODING_OPTIONS,
            Self::Color => &COLOR_OPTIONS,
            Self::Numerals => &NUMERALS_OPTIONS,
            Self::MorseCode => &MORSE_OPTIONS,
        };
        fixed.to_vec()
    }

    /// Whether the `from` selector is meaningful for this family
    pub fn uses_from_unit(&self) -> bool {
        !matches!(self, Self::TextCase | Self::Encoding)
    }
}

/// Identity and metadata for one convertible quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverterDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    #[serde(flatten)]
    pub kind: ConverterKind,
}

impl ConverterDescriptor {
    /// Title without the word " Converter", as used in history entries
    pub fn short_title(&self) -> String {
        self.title.replacen(" Converter", "", 1)
    }

    /// Title shown on a catalog card
    pub fn card_title(&self) -> String {
        self.title.replace(" Converter", "").replace(" (Approx)", "")
    }

    /// Case-insensitive match against keywords and card title.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let keywords = self.keywords.join(" ").to_lowercase();
        keywords.contains(&query) || self.card_title().to_lowercase().contains(&query)
    }
}

impl fmt::Display for ConverterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}
