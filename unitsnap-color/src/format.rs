//! Parsing and rendering of HEX, RGB and HSL color text

use crate::space::{Hsl, Rgb};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use unitsnap_core::{ConversionError, ConversionResult};

/// Three comma-separated integers anywhere in the input, so `rgb(1, 2, 3)`
/// and `1,2,3` both match
static RGB_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)"));

static HSL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*,\s*([0-9]+)%?\s*,\s*([0-9]+)%?"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
}

impl FromStr for ColorFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            "hsl" => Ok(Self::Hsl),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

impl ColorFormat {
    /// Parse color text in this format into RGB
    pub fn parse(self, input: &str) -> ConversionResult<Rgb> {
        match self {
            Self::Hex => hex_to_rgb(input),
            Self::Rgb => parse_rgb(input),
            Self::Hsl => parse_hsl(input).map(Hsl::to_rgb),
        }
    }

    pub fn render(self, rgb: Rgb) -> String {
        match self {
            Self::Hex => rgb.to_hex(),
            Self::Rgb => rgb.to_string(),
            Self::Hsl => rgb.to_hsl().to_string(),
        }
    }
}

/// `#RGB` or `#RRGGBB`, `#` optional, any case. Shorthand doubles each
/// digit.
pub fn hex_to_rgb(hex: &str) -> ConversionResult<Rgb> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || ConversionError::unparseable(format!("'{}' is not a hex color", trimmed));

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

fn captures<'a>(
    pattern: &'static LazyLock<Result<Regex, regex::Error>>,
    input: &'a str,
    what: &str,
) -> ConversionResult<[&'a str; 3]> {
    let regex = pattern
        .as_ref()
        .map_err(|e| ConversionError::unparseable(format!("invalid {} pattern: {}", what, e)))?;
    let caps = regex
        .captures(input)
        .ok_or_else(|| ConversionError::unparseable(format!("'{}' is not an {} color", input.trim(), what)))?;

    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    Ok([group(1), group(2), group(3)])
}

fn component<T: FromStr>(digits: &str, max: u32, name: &str) -> ConversionResult<T> {
    match digits.parse::<u32>() {
        Ok(n) if n <= max => digits
            .parse::<T>()
            .map_err(|_| ConversionError::domain(format!("{} {} is out of range", name, digits))),
        _ => Err(ConversionError::domain(format!("{} {} exceeds {}", name, digits, max))),
    }
}

/// Parse `r, g, b`; channels above 255 are out of range
pub fn parse_rgb(input: &str) -> ConversionResult<Rgb> {
    let [r, g, b] = captures(&RGB_PATTERN, input, "RGB")?;
    Ok(Rgb::new(
        component(r, 255, "red")?,
        component(g, 255, "green")?,
        component(b, 255, "blue")?,
    ))
}

/// Parse `h, s%, l%` with optional percent signs
pub fn parse_hsl(input: &str) -> ConversionResult<Hsl> {
    let [h, s, l] = captures(&HSL_PATTERN, input, "HSL")?;
    Hsl::new(
        component(h, 360, "hue")?,
        component(s, 100, "saturation")?,
        component(l, 100, "lightness")?,
    )
}

/// Convert color text between formats, pivoting through RGB
pub fn convert_color(input: &str, from: &str, to: &str) -> ConversionResult<String> {
    let from: ColorFormat = from.parse()?;
    let to: ColorFormat = to.parse()?;
    Ok(to.render(from.parse(input)?))
}
