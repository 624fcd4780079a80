//! CSS length conversion between px, rem and em

use std::str::FromStr;
use unitsnap_core::{ConversionError, ConversionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypographyUnit {
    Px,
    Rem,
    Em,
}

impl FromStr for TypographyUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "px" => Ok(Self::Px),
            "rem" => Ok(Self::Rem),
            "em" => Ok(Self::Em),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

impl TypographyUnit {
    // em is treated like rem: both are relative to the root font size
    fn to_px(self, value: f64, base: f64) -> f64 {
        match self {
            Self::Px => value,
            Self::Rem | Self::Em => value * base,
        }
    }

    fn from_px(self, px: f64, base: f64) -> f64 {
        match self {
            Self::Px => px,
            Self::Rem | Self::Em => px / base,
        }
    }
}

/// Convert a CSS length using `base_font_size` pixels per rem/em
pub fn convert_typography(value: f64, from: &str, to: &str, base_font_size: f64) -> ConversionResult<f64> {
    let from: TypographyUnit = from.parse()?;
    let to: TypographyUnit = to.parse()?;
    if base_font_size <= 0.0 || !base_font_size.is_finite() {
        return Err(ConversionError::domain("base font size must be a positive number"));
    }
    Ok(to.from_px(from.to_px(value, base_font_size), base_font_size))
}
