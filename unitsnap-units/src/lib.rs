//! UnitSnap Units - catalog and numeric converters
//!
//! Holds the converter catalog and the engine families that work on plain
//! numbers:
//! - Linear factor tables (length, weight, currency, ...)
//! - Temperature (Celsius, Fahrenheit, Kelvin)
//! - Fuel economy (km/L, MPG US/UK, L/100km)
//! - Typography (px, rem, em)

mod catalog;
mod convert;
mod descriptor;
mod fuel;
mod linear;
mod temperature;
mod typography;

pub use catalog::{Catalog, CATALOG};
pub use descriptor::{ConverterDescriptor, ConverterKind, UnitDef, UnitOption, UnitTable};
pub use fuel::{convert_fuel_economy, FuelUnit};
pub use linear::{convert_linear, quick_compare, Comparison, QUICK_COMPARE_COUNT};
pub use temperature::{convert_temperature, TemperatureUnit};
pub use typography::{convert_typography, TypographyUnit};

use unitsnap_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion
        .with_function(convert::Convert)
        .with_function(convert::ConvertTemperature)
        .with_function(convert::ConvertFuelEconomy)
        .with_function(convert::ConvertTypography)

        // Presentation
        .with_function(convert::QuickCompare)
        .with_function(convert::FormatNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitsnap_core::Value;
    use unitsnap_plugin::EvalContext;

    #[test]
    fn test_library_registers_functions() {
        let registry = load_units_library(PluginRegistry::new());
        assert_eq!(registry.len(), 6);
        assert!(registry.get_function("convert_temperature").is_some());

        let result = registry.call_function(
            "convert_temperature",
            &[Value::from(0.0), Value::from("celsius"), Value::from("fahrenheit")],
            &EvalContext::default(),
        );
        assert_eq!(result, Value::Number(32.0));
    }
}
