//! Temperature conversion, pivoting through Celsius

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use unitsnap_core::{ConversionError, ConversionResult};

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn key(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
            Self::Kelvin => "kelvin",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - KELVIN_OFFSET,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "celsius" => Ok(Self::Celsius),
            "fahrenheit" => Ok(Self::Fahrenheit),
            "kelvin" => Ok(Self::Kelvin),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Convert a temperature between two scales given by key.
///
/// No physical lower bound is enforced.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> ConversionResult<f64> {
    let from: TemperatureUnit = from.parse()?;
    let to: TemperatureUnit = to.parse()?;
    Ok(to.from_celsius(from.to_celsius(value)))
}
