//! Conversion functions for the plugin registry

use crate::catalog::CATALOG;
use crate::fuel::convert_fuel_economy;
use crate::linear::{convert_linear, quick_compare};
use crate::temperature::convert_temperature;
use crate::typography::convert_typography;
use unitsnap_core::format_number;
use unitsnap_plugin::prelude::*;

/// Unit table of a linear catalog entry, or a structured error
fn linear_units(func: &str, converter: &str) -> Result<&'static crate::UnitTable, SnapError> {
    let descriptor = CATALOG
        .get(converter)
        .ok_or_else(|| SnapError::not_found("converter", converter))?;
    descriptor.kind.units().ok_or_else(|| {
        SnapError::arg_type(func, "converter", "linear converter", descriptor.kind.name())
            .with_suggestion(format!("Use the {} functions for this converter", descriptor.kind.name()))
    })
}

/// Unrounded result; display rounding is left to `format_number`
fn finite(value: f64) -> Result<Value, SnapError> {
    if value.is_finite() {
        Ok(Value::Number(value))
    } else {
        Err(SnapError::domain_error("result is not a finite number"))
    }
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("converter", "Text", "Linear converter id (e.g., \"length\")"),
    ArgMeta::required("from_unit", "Text", "Source unit key (e.g., \"kilometer\")"),
    ArgMeta::required("to_unit", "Text", "Target unit key (e.g., \"mile\")"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"length\", \"mile\", \"meter\") → 1609.344",
    "convert(1, \"data-storage\", \"megabyte\", \"kilobyte\") → 1024",
    "format_number(convert(10, \"length\", \"kilometer\", \"mile\")) → \"6.21371\"",
];

static CONVERT_RELATED: [&str; 2] = ["quick_compare", "format_number"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value between two units of a linear converter",
            usage: "convert(value, converter, from_unit, to_unit)",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 4, "convert")?;
            let value = require_number(&args[0], "convert", "value")?;
            let converter = require_text(&args[1], "convert", "converter")?;
            let from = require_text(&args[2], "convert", "from_unit")?;
            let to = require_text(&args[3], "convert", "to_unit")?;

            let units = linear_units("convert", converter)?;
            finite(convert_linear(value, from, to, units)?)
        };
        run().into()
    }
}

// ============ convert_temperature ============

pub struct ConvertTemperature;

static CONVERT_TEMPERATURE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Temperature to convert"),
    ArgMeta::required("from_unit", "Text", "celsius, fahrenheit or kelvin"),
    ArgMeta::required("to_unit", "Text", "celsius, fahrenheit or kelvin"),
];

static CONVERT_TEMPERATURE_EXAMPLES: [&str; 2] = [
    "convert_temperature(0, \"celsius\", \"fahrenheit\") → 32",
    "convert_temperature(100, \"celsius\", \"kelvin\") → 373.15",
];

static CONVERT_TEMPERATURE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ConvertTemperature {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_temperature",
            description: "Convert between Celsius, Fahrenheit and Kelvin",
            usage: "convert_temperature(value, from_unit, to_unit)",
            args: &CONVERT_TEMPERATURE_ARGS,
            returns: "Number",
            examples: &CONVERT_TEMPERATURE_EXAMPLES,
            category: "units",
            related: &CONVERT_TEMPERATURE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 3, "convert_temperature")?;
            let value = require_number(&args[0], "convert_temperature", "value")?;
            let from = require_text(&args[1], "convert_temperature", "from_unit")?;
            let to = require_text(&args[2], "convert_temperature", "to_unit")?;
            finite(convert_temperature(value, from, to)?)
        };
        run().into()
    }
}

// ============ convert_fuel_economy ============

pub struct ConvertFuelEconomy;

static CONVERT_FUEL_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Positive fuel economy figure"),
    ArgMeta::required("from_unit", "Text", "km-per-liter, mpg-us, mpg-uk or liter-per-100km"),
    ArgMeta::required("to_unit", "Text", "km-per-liter, mpg-us, mpg-uk or liter-per-100km"),
];

static CONVERT_FUEL_EXAMPLES: [&str; 2] = [
    "convert_fuel_economy(10, \"km-per-liter\", \"liter-per-100km\") → 10",
    "convert_fuel_economy(1, \"mpg-us\", \"km-per-liter\") → 0.425144",
];

static CONVERT_FUEL_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ConvertFuelEconomy {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_fuel_economy",
            description: "Convert between km/L, US and UK miles per gallon, and L/100km",
            usage: "convert_fuel_economy(value, from_unit, to_unit)",
            args: &CONVERT_FUEL_ARGS,
            returns: "Number",
            examples: &CONVERT_FUEL_EXAMPLES,
            category: "units",
            related: &CONVERT_FUEL_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 3, "convert_fuel_economy")?;
            let value = require_number(&args[0], "convert_fuel_economy", "value")?;
            let from = require_text(&args[1], "convert_fuel_economy", "from_unit")?;
            let to = require_text(&args[2], "convert_fuel_economy", "to_unit")?;
            finite(convert_fuel_economy(value, from, to)?)
        };
        run().into()
    }
}

// ============ convert_typography ============

pub struct ConvertTypography;

static CONVERT_TYPOGRAPHY_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Length to convert"),
    ArgMeta::required("from_unit", "Text", "px, rem or em"),
    ArgMeta::required("to_unit", "Text", "px, rem or em"),
    ArgMeta::optional("base_font_size", "Number", "Pixels per rem/em", "16"),
];

static CONVERT_TYPOGRAPHY_EXAMPLES: [&str; 2] = [
    "convert_typography(2, \"rem\", \"px\") → 32",
    "convert_typography(24, \"px\", \"em\", 12) → 2",
];

static CONVERT_TYPOGRAPHY_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ConvertTypography {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_typography",
            description: "Convert CSS lengths between px, rem and em",
            usage: "convert_typography(value, from_unit, to_unit, [base_font_size])",
            args: &CONVERT_TYPOGRAPHY_ARGS,
            returns: "Number",
            examples: &CONVERT_TYPOGRAPHY_EXAMPLES,
            category: "units",
            related: &CONVERT_TYPOGRAPHY_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 3, "convert_typography")?;
            let value = require_number(&args[0], "convert_typography", "value")?;
            let from = require_text(&args[1], "convert_typography", "from_unit")?;
            let to = require_text(&args[2], "convert_typography", "to_unit")?;
            let base = optional_number(args, 3, "convert_typography", "base_font_size")?
                .unwrap_or(ctx.base_font_size);
            finite(convert_typography(value, from, to, base)?)
        };
        run().into()
    }
}

// ============ quick_compare ============

pub struct QuickCompare;

static QUICK_COMPARE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Value to compare"),
    ArgMeta::required("converter", "Text", "Linear converter id"),
    ArgMeta::required("from_unit", "Text", "Unit of the value"),
];

static QUICK_COMPARE_EXAMPLES: [&str; 1] =
    ["quick_compare(1, \"length\", \"meter\") → [{unit: \"Kilometer (km)\", value: \"0.001\"}, ...]"];

static QUICK_COMPARE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for QuickCompare {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "quick_compare",
            description: "Show a value in the first three units of a linear converter, skipping the source unit",
            usage: "quick_compare(value, converter, from_unit)",
            args: &QUICK_COMPARE_ARGS,
            returns: "List",
            examples: &QUICK_COMPARE_EXAMPLES,
            category: "units",
            related: &QUICK_COMPARE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 3, "quick_compare")?;
            let value = require_number(&args[0], "quick_compare", "value")?;
            let converter = require_text(&args[1], "quick_compare", "converter")?;
            let from = require_text(&args[2], "quick_compare", "from_unit")?;

            let units = linear_units("quick_compare", converter)?;
            let rows = quick_compare(value, from, units, ctx.precision)?
                .into_iter()
                .map(|row| {
                    Value::object([
                        ("key", Value::from(row.key)),
                        ("unit", Value::from(row.name)),
                        ("value", Value::from(row.formatted)),
                    ])
                })
                .collect();
            Ok(Value::List(rows))
        };
        run().into()
    }
}

// ============ format_number ============

pub struct FormatNumber;

static FORMAT_NUMBER_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Number to render"),
    ArgMeta::optional("precision", "Number", "Significant digits", "6"),
];

static FORMAT_NUMBER_EXAMPLES: [&str; 3] = [
    "format_number(6.2137119) → \"6.21371\"",
    "format_number(1234567) → \"1.235e+6\"",
    "format_number(3.14159, 3) → \"3.14\"",
];

static FORMAT_NUMBER_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for FormatNumber {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_number",
            description: "Render a number with a fixed count of significant digits",
            usage: "format_number(value, [precision])",
            args: &FORMAT_NUMBER_ARGS,
            returns: "Text",
            examples: &FORMAT_NUMBER_EXAMPLES,
            category: "units",
            related: &FORMAT_NUMBER_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "format_number")?;
            let value = require_number(&args[0], "format_number", "value")?;
            let precision = match optional_number(args, 1, "format_number", "precision")? {
                Some(p) if p >= 1.0 && p.fract() == 0.0 => p as u32,
                Some(p) => {
                    return Err(SnapError::domain_error(format!("precision must be a positive integer, got {}", p)))
                }
                None => ctx.precision,
            };
            format_number(value, precision)
                .map(Value::Text)
                .ok_or_else(|| SnapError::domain_error("value is not a finite number"))
        };
        run().into()
    }
}
