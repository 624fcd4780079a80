//! Linear (factor-based) unit conversion

use crate::descriptor::UnitTable;
use unitsnap_core::{format_number, ConversionResult};

/// Number of units offered by [`quick_compare`]
pub const QUICK_COMPARE_COUNT: usize = 3;

/// Convert `value` between two units of the same table.
///
/// Every factor is relative to the table's base, so neither key needs to
/// be the base unit itself. The result is not rounded.
pub fn convert_linear(value: f64, from: &str, to: &str, units: &UnitTable) -> ConversionResult<f64> {
    let from_factor = units.factor(from)?;
    let to_factor = units.factor(to)?;
    Ok(value * from_factor / to_factor)
}

/// One row of a quick comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub key: &'static str,
    pub name: &'static str,
    pub formatted: String,
}

/// `value` in `from`, expressed in the first few units of the table.
/// The source unit is skipped but not replaced, so a source among the
/// first [`QUICK_COMPARE_COUNT`] units yields one row fewer.
pub fn quick_compare(
    value: f64,
    from: &str,
    units: &UnitTable,
    precision: u32,
) -> ConversionResult<Vec<Comparison>> {
    let from_factor = units.factor(from)?;
    let base = value * from_factor;

    Ok(units
        .iter()
        .take(QUICK_COMPARE_COUNT)
        .filter(|u| u.key != from)
        .filter_map(|u| {
            let formatted = format_number(base / u.factor, precision)?;
            Some(Comparison { key: u.key, name: u.name, formatted })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CATALOG;
    use proptest::prelude::*;
    use unitsnap_core::ConversionError;

    fn units(id: &str) -> &'static UnitTable {
        CATALOG.get(id).and_then(|c| c.kind.units()).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_kilometer_to_mile() {
        let miles = convert_linear(10.0, "kilometer", "mile", units("length")).unwrap();
        assert!(approx(miles, 6.213711922373339));
    }

    #[test]
    fn test_non_base_units() {
        // Neither side is the base unit
        let kb = convert_linear(1.0, "megabyte", "kilobyte", units("data-storage")).unwrap();
        assert_eq!(kb, 1024.0);
        assert_eq!(convert_linear(2.0, "tablespoon", "teaspoon", units("cooking")).unwrap(), 6.0);
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert_linear(1.0, "furlong", "meter", units("length")).unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit("furlong"));
        let err = convert_linear(1.0, "meter", "parsec", units("length")).unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit("parsec"));
    }

    #[test]
    fn test_quick_compare_skips_source_unit() {
        let rows = quick_compare(1.0, "meter", units("length"), 6).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["kilometer", "centimeter"]);
        assert_eq!(rows[0].formatted, "0.001");
        assert_eq!(rows[1].formatted, "100");

        let rows = quick_compare(1.0, "kilometer", units("length"), 6).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["meter", "centimeter"]);
    }

    #[test]
    fn test_quick_compare_source_outside_leading_units() {
        let rows = quick_compare(1.0, "mile", units("length"), 6).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["meter", "kilometer", "centimeter"]);
        assert_eq!(rows[0].formatted, "1609.34");
    }

    #[test]
    fn test_quick_compare_small_table() {
        let rows = quick_compare(1.0, "newton-meter", units("torque"), 6).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Pound-foot (lb⋅ft)");
    }

    proptest! {
        #[test]
        fn prop_linear_round_trip(
            entry in 0usize..27,
            a in 0usize..8,
            b in 0usize..8,
            value in -1.0e9f64..1.0e9,
        ) {
            let converter = CATALOG.iter().nth(entry).unwrap();
            if let Some(table) = converter.kind.units() {
                let keys: Vec<_> = table.keys().collect();
                let from = keys[a % keys.len()];
                let to = keys[b % keys.len()];

                let there = convert_linear(value, from, to, table).unwrap();
                let back = convert_linear(there, to, from, table).unwrap();
                prop_assert!(approx(back, value), "{} {} -> {} -> {}", value, from, to, back);
            }
        }
    }
}
