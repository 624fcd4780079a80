//! Fuel economy conversion, pivoting through km/L

use std::str::FromStr;
use unitsnap_core::{ConversionError, ConversionResult};

/// km/L per US mile-per-gallon
const KM_PER_LITER_PER_MPG_US: f64 = 0.425144;
/// km/L per imperial mile-per-gallon
const KM_PER_LITER_PER_MPG_UK: f64 = 0.354006;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelUnit {
    KmPerLiter,
    MpgUs,
    MpgUk,
    LiterPer100Km,
}

impl FuelUnit {
    fn to_km_per_liter(self, value: f64) -> f64 {
        match self {
            Self::KmPerLiter => value,
            Self::MpgUs => value * KM_PER_LITER_PER_MPG_US,
            Self::MpgUk => value * KM_PER_LITER_PER_MPG_UK,
            Self::LiterPer100Km => 100.0 / value,
        }
    }

    fn from_km_per_liter(self, kml: f64) -> f64 {
        match self {
            Self::KmPerLiter => kml,
            Self::MpgUs => kml / KM_PER_LITER_PER_MPG_US,
            Self::MpgUk => kml / KM_PER_LITER_PER_MPG_UK,
            Self::LiterPer100Km => 100.0 / kml,
        }
    }
}

impl FromStr for FuelUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "km-per-liter" => Ok(Self::KmPerLiter),
            "mpg-us" => Ok(Self::MpgUs),
            "mpg-uk" => Ok(Self::MpgUk),
            "liter-per-100km" => Ok(Self::LiterPer100Km),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

/// Convert a fuel economy figure. L/100km is reciprocal to the others,
/// so zero and negative inputs are rejected.
pub fn convert_fuel_economy(value: f64, from: &str, to: &str) -> ConversionResult<f64> {
    let from: FuelUnit = from.parse()?;
    let to: FuelUnit = to.parse()?;
    if value <= 0.0 || !value.is_finite() {
        return Err(ConversionError::domain("fuel economy must be a positive number"));
    }
    Ok(to.from_km_per_liter(from.to_km_per_liter(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonic_relation() {
        assert_eq!(convert_fuel_economy(10.0, "km-per-liter", "liter-per-100km").unwrap(), 10.0);
        assert_eq!(convert_fuel_economy(5.0, "liter-per-100km", "km-per-liter").unwrap(), 20.0);
    }

    #[test]
    fn test_mpg() {
        let kml = convert_fuel_economy(1.0, "mpg-us", "km-per-liter").unwrap();
        assert_eq!(kml, 0.425144);

        let us = convert_fuel_economy(30.0, "mpg-uk", "mpg-us").unwrap();
        assert!((us - 30.0 * 0.354006 / 0.425144).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_is_domain_error() {
        let err = convert_fuel_economy(-5.0, "km-per-liter", "liter-per-100km").unwrap_err();
        assert_eq!(err.code(), "DOMAIN_ERROR");
        assert!(convert_fuel_economy(0.0, "mpg-us", "mpg-uk").is_err());
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert_fuel_economy(1.0, "miles-per-liter", "mpg-us"),
            Err(ConversionError::unknown_unit("miles-per-liter"))
        );
    }
}
