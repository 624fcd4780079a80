//! Converter catalog - the 27 built-in converters in display order

use crate::descriptor::{ConverterDescriptor, ConverterKind, UnitDef, UnitTable};
use std::sync::LazyLock;
use tracing::debug;

/// Global converter catalog
pub static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// Ordered, immutable list of converters
#[derive(Debug, Clone)]
pub struct Catalog {
    converters: Vec<ConverterDescriptor>,
}

impl Catalog {
    pub fn new(converters: Vec<ConverterDescriptor>) -> Self {
        Self { converters }
    }

    /// Look up a converter by id
    pub fn get(&self, id: &str) -> Option<&ConverterDescriptor> {
        self.converters.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConverterDescriptor> {
        self.converters.iter()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Converters whose keywords or card title contain `query`
    pub fn search(&self, query: &str) -> Vec<&ConverterDescriptor> {
        self.converters.iter().filter(|c| c.matches(query)).collect()
    }

    fn builtin() -> Self {
        let catalog = Self::new(vec![
            length(),
            data_storage(),
            simple("temperature", "Temperature Converter",
                "Convert between Celsius, Fahrenheit, and Kelvin",
                &["temperature", "celsius", "fahrenheit", "kelvin", "temp", "hot", "cold"],
                ConverterKind::Temperature),
            cooking(),
            area(),
            transfer_rate(),
            pressure(),
            currency(),
            weight(),
            simple("number-base", "Number Base Converter",
                "Convert between decimal, binary, and hexadecimal",
                &["number", "base", "decimal", "binary", "hexadecimal", "hex", "bin", "oct"],
                ConverterKind::NumberBase),
            energy(),
            simple("fuel-economy", "Fuel Economy Converter",
                "Convert between km/L, MPG (US/UK), and L/100km",
                &["fuel", "economy", "mpg", "km/l", "liter", "gallon", "mileage"],
                ConverterKind::FuelEconomy),
            angle(),
            power(),
            torque(),
            simple("text-case", "Text Case Converter",
                "Convert text to UPPERCASE, lowercase, Title Case, or Sentence case",
                &["text", "case", "upper", "lower", "title", "sentence", "string"],
                ConverterKind::TextCase),
            simple("encoding", "Text Encoding Converter",
                "Encode and decode Base64 and URL encoding",
                &["encoding", "base64", "url", "encode", "decode"],
                ConverterKind::Encoding),
            flow_rate(),
            time(),
            simple("typography", "Typography Converter",
                "Convert between px, rem, and em (base: 16px)",
                &["typography", "px", "rem", "em", "pixel", "font", "size"],
                ConverterKind::Typography),
            simple("roman-numerals", "Roman Numerals Converter",
                "Convert between Roman numerals and decimal numbers",
                &["roman", "numeral", "decimal", "number", "i", "v", "x", "l", "c", "d", "m"],
                ConverterKind::RomanNumerals),
            speed(),
            radiation(),
            simple("color", "Color Converter",
                "Convert between HEX, RGB, and HSL with color preview",
                &["color", "hex", "rgb", "hsl", "colour"],
                ConverterKind::Color),
            simple("numerals", "Numerals Converter",
                "Convert between English words and numeric values (e.g., \"One\" ↔ 1)",
                &["numeral", "word", "number", "english", "text", "numeric"],
                ConverterKind::Numerals),
            simple("morse-code", "Morse Code Converter",
                "Convert between text and Morse code",
                &["morse", "code", "text", "dot", "dash"],
                ConverterKind::MorseCode),
            frequency(),
        ]);
        debug!(converters = catalog.len(), "built converter catalog");
        catalog
    }
}

fn simple(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    kind: ConverterKind,
) -> ConverterDescriptor {
    ConverterDescriptor { id, title, description, keywords, kind }
}

fn linear(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    units: Vec<UnitDef>,
) -> ConverterDescriptor {
    simple(id, title, description, keywords, ConverterKind::Linear { units: UnitTable::new(units) })
}

fn length() -> ConverterDescriptor {
    linear("length", "Length Converter",
        "Convert between meters, kilometers, miles, feet, inches, and more",
        &["length", "distance", "meter", "kilometer", "mile", "foot", "inch", "yard", "cm", "mm"],
        vec![
            UnitDef::new("meter", "Meter (m)", 1.0),
            UnitDef::new("kilometer", "Kilometer (km)", 1000.0),
            UnitDef::new("centimeter", "Centimeter (cm)", 0.01),
            UnitDef::new("millimeter", "Millimeter (mm)", 0.001),
            UnitDef::new("mile", "Mile (mi)", 1609.344),
            UnitDef::new("yard", "Yard (yd)", 0.9144),
            UnitDef::new("foot", "Foot (ft)", 0.3048),
            UnitDef::new("inch", "Inch (in)", 0.0254),
        ])
}

fn data_storage() -> ConverterDescriptor {
    // Binary multiples, counted in bits
    linear("data-storage", "Data Storage Converter",
        "Convert between bits, bytes, KB, MB, GB, TB (binary)",
        &["data", "storage", "byte", "bit", "kb", "mb", "gb", "tb", "kilobyte", "megabyte", "gigabyte"],
        vec![
            UnitDef::new("bit", "Bit", 1.0),
            UnitDef::new("byte", "Byte (B)", 8.0),
            UnitDef::new("kilobyte", "Kilobyte (KB)", 8192.0),
            UnitDef::new("megabyte", "Megabyte (MB)", 8_388_608.0),
            UnitDef::new("gigabyte", "Gigabyte (GB)", 8_589_934_592.0),
            UnitDef::new("terabyte", "Terabyte (TB)", 8_796_093_022_208.0),
        ])
}

fn cooking() -> ConverterDescriptor {
    // Teaspoon-based; grams assume water density
    linear("cooking", "Cooking Converter",
        "Convert between teaspoons, tablespoons, cups, milliliters, liters, grams, and ounces",
        &["cooking", "recipe", "teaspoon", "tablespoon", "cup", "milliliter", "liter", "gram", "ounce"],
        vec![
            UnitDef::new("teaspoon", "Teaspoon (tsp)", 1.0),
            UnitDef::new("tablespoon", "Tablespoon (tbsp)", 3.0),
            UnitDef::new("cup", "Cup", 48.0),
            UnitDef::new("milliliter", "Milliliter (mL)", 0.202884),
            UnitDef::new("liter", "Liter (L)", 202.884),
            UnitDef::new("gram", "Gram (g)", 0.202884),
            UnitDef::new("ounce", "Ounce (oz)", 6.0),
        ])
}

fn area() -> ConverterDescriptor {
    linear("area", "Area Converter",
        "Convert between square meters, kilometers, acres, hectares, square feet, and miles",
        &["area", "square", "meter", "kilometer", "acre", "hectare", "feet", "mile"],
        vec![
            UnitDef::new("square-meter", "Square Meter (m²)", 1.0),
            UnitDef::new("square-kilometer", "Square Kilometer (km²)", 1_000_000.0),
            UnitDef::new("square-foot", "Square Foot (ft²)", 0.092903),
            UnitDef::new("square-mile", "Square Mile (mi²)", 2_589_988.0),
            UnitDef::new("acre", "Acre", 4046.86),
            UnitDef::new("hectare", "Hectare (ha)", 10_000.0),
        ])
}

fn transfer_rate() -> ConverterDescriptor {
    linear("transfer-rate", "Transfer Rate Converter",
        "Convert between bps, Kbps, Mbps, Gbps, and bytes per second",
        &["transfer", "rate", "speed", "bps", "kbps", "mbps", "gbps", "bandwidth", "internet"],
        vec![
            UnitDef::new("bps", "Bits per second (bps)", 1.0),
            UnitDef::new("kbps", "Kilobits per second (Kbps)", 1000.0),
            UnitDef::new("mbps", "Megabits per second (Mbps)", 1_000_000.0),
            UnitDef::new("gbps", "Gigabits per second (Gbps)", 1_000_000_000.0),
            UnitDef::new("bytes-per-sec", "Bytes per second (B/s)", 8.0),
        ])
}

fn pressure() -> ConverterDescriptor {
    linear("pressure", "Pressure Converter",
        "Convert between Pascal, Bar, PSI, atmosphere, and torr",
        &["pressure", "pascal", "bar", "psi", "atmosphere", "torr"],
        vec![
            UnitDef::new("pascal", "Pascal (Pa)", 1.0),
            UnitDef::new("bar", "Bar", 100_000.0),
            UnitDef::new("psi", "PSI (lb/in²)", 6894.76),
            UnitDef::new("atmosphere", "Atmosphere (atm)", 101_325.0),
            UnitDef::new("torr", "Torr", 133.322),
        ])
}

fn currency() -> ConverterDescriptor {
    // Fixed approximate rates against the rupee
    linear("currency", "Currency Converter (Approx)",
        "Approximate conversion between INR, USD, EUR, and GBP",
        &["currency", "money", "inr", "usd", "eur", "gbp", "dollar", "euro", "pound", "rupee"],
        vec![
            UnitDef::new("inr", "Indian Rupee (₹)", 1.0),
            UnitDef::new("usd", "US Dollar ($)", 83.0),
            UnitDef::new("eur", "Euro (€)", 90.0),
            UnitDef::new("gbp", "British Pound (£)", 105.0),
        ])
}

fn weight() -> ConverterDescriptor {
    linear("weight", "Weight / Mass Converter",
        "Convert between grams, kilograms, tonnes, pounds, and ounces",
        &["weight", "mass", "gram", "kilogram", "tonne", "pound", "ounce", "kg", "lb"],
        vec![
            UnitDef::new("gram", "Gram (g)", 1.0),
            UnitDef::new("kilogram", "Kilogram (kg)", 1000.0),
            UnitDef::new("tonne", "Tonne (t)", 1_000_000.0),
            UnitDef::new("pound", "Pound (lb)", 453.592),
            UnitDef::new("ounce", "Ounce (oz)", 28.3495),
        ])
}

fn energy() -> ConverterDescriptor {
    linear("energy", "Energy Converter",
        "Convert between joules, kilojoules, calories, kilocalories, and watt-hours",
        &["energy", "joule", "calorie", "watt", "kwh", "kilojoule", "kilocalorie"],
        vec![
            UnitDef::new("joule", "Joule (J)", 1.0),
            UnitDef::new("kilojoule", "Kilojoule (kJ)", 1000.0),
            UnitDef::new("calorie", "Calorie (cal)", 4.184),
            UnitDef::new("kilocalorie", "Kilocalorie (kcal)", 4184.0),
            UnitDef::new("watt-hour", "Watt-hour (Wh)", 3600.0),
            UnitDef::new("kilowatt-hour", "Kilowatt-hour (kWh)", 3_600_000.0),
        ])
}

fn angle() -> ConverterDescriptor {
    linear("angle", "Angle Converter",
        "Convert between degrees, radians, and gradians",
        &["angle", "degree", "radian", "gradian", "rad", "deg"],
        vec![
            UnitDef::new("degree", "Degree (°)", 1.0),
            UnitDef::new("radian", "Radian (rad)", 57.2958),
            UnitDef::new("gradian", "Gradian (grad)", 0.9),
        ])
}

fn power() -> ConverterDescriptor {
    linear("power", "Power Converter",
        "Convert between watts, kilowatts, and horsepower",
        &["power", "watt", "kilowatt", "horsepower", "hp", "kw"],
        vec![
            UnitDef::new("watt", "Watt (W)", 1.0),
            UnitDef::new("kilowatt", "Kilowatt (kW)", 1000.0),
            UnitDef::new("horsepower", "Horsepower (hp)", 745.7),
        ])
}

fn torque() -> ConverterDescriptor {
    linear("torque", "Torque Converter",
        "Convert between newton-meters and pound-feet",
        &["torque", "newton", "meter", "pound", "foot", "nm", "lb-ft"],
        vec![
            UnitDef::new("newton-meter", "Newton-meter (N⋅m)", 1.0),
            UnitDef::new("pound-foot", "Pound-foot (lb⋅ft)", 1.35582),
        ])
}

fn flow_rate() -> ConverterDescriptor {
    linear("flow-rate", "Flow Rate Converter",
        "Convert between cubic meters per second, liters per minute, and gallons per minute",
        &["flow", "rate", "cubic", "meter", "liter", "gallon", "minute", "second"],
        vec![
            UnitDef::new("cubic-meter-sec", "Cubic meter/second (m³/s)", 1.0),
            UnitDef::new("liter-min", "Liter/minute (L/min)", 0.0000166667),
            UnitDef::new("gallon-min", "Gallon/minute (gal/min)", 0.0000630902),
        ])
}

fn time() -> ConverterDescriptor {
    linear("time", "Time Converter",
        "Convert between seconds, minutes, hours, days, weeks, months, and years",
        &["time", "second", "minute", "hour", "day", "week", "month", "year"],
        vec![
            UnitDef::new("second", "Second (s)", 1.0),
            UnitDef::new("minute", "Minute (min)", 60.0),
            UnitDef::new("hour", "Hour (hr)", 3600.0),
            UnitDef::new("day", "Day", 86_400.0),
            UnitDef::new("week", "Week", 604_800.0),
            UnitDef::new("month", "Month (30 days)", 2_592_000.0),
            UnitDef::new("year", "Year (365 days)", 31_536_000.0),
        ])
}

fn speed() -> ConverterDescriptor {
    linear("speed", "Speed Converter",
        "Convert between m/s, km/h, mph, and knots",
        &["speed", "velocity", "meter", "kilometer", "mile", "hour", "knot", "mph", "kmh"],
        vec![
            UnitDef::new("meter-sec", "Meter/second (m/s)", 1.0),
            UnitDef::new("kilometer-hour", "Kilometer/hour (km/h)", 0.277778),
            UnitDef::new("mile-hour", "Mile/hour (mph)", 0.44704),
            UnitDef::new("knot", "Knot", 0.514444),
        ])
}

fn radiation() -> ConverterDescriptor {
    linear("radiation", "Radiation Converter",
        "Convert between Gray, Sievert, Rad, and Rem",
        &["radiation", "gray", "sievert", "rad", "rem"],
        vec![
            UnitDef::new("gray", "Gray (Gy)", 1.0),
            UnitDef::new("sievert", "Sievert (Sv)", 1.0),
            UnitDef::new("rad", "Rad", 0.01),
            UnitDef::new("rem", "Rem", 0.01),
        ])
}

fn frequency() -> ConverterDescriptor {
    linear("frequency", "Frequency Converter",
        "Convert between Hertz, Kilohertz, Megahertz, and Gigahertz",
        &["frequency", "hertz", "kilohertz", "megahertz", "gigahertz", "hz", "khz", "mhz", "ghz"],
        vec![
            UnitDef::new("hertz", "Hertz (Hz)", 1.0),
            UnitDef::new("kilohertz", "Kilohertz (kHz)", 1000.0),
            UnitDef::new("megahertz", "Megahertz (MHz)", 1_000_000.0),
            UnitDef::new("gigahertz", "Gigahertz (GHz)", 1_000_000_000.0),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size_and_order() {
        assert_eq!(CATALOG.len(), 27);
        let ids: Vec<_> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.first(), Some(&"length"));
        assert_eq!(ids.last(), Some(&"frequency"));
        assert_eq!(ids[2], "temperature");
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_linear_tables_are_well_formed() {
        for converter in CATALOG.iter() {
            let Some(units) = converter.kind.units() else { continue };
            assert!(!units.is_empty(), "{} has no units", converter.id);

            let keys: HashSet<_> = units.keys().collect();
            assert_eq!(keys.len(), units.len(), "{} has duplicate unit keys", converter.id);

            for unit in units.iter() {
                assert!(unit.factor > 0.0, "{}/{} factor must be positive", converter.id, unit.key);
            }
        }
    }

    #[test]
    fn test_get_by_id() {
        let length = CATALOG.get("length").unwrap();
        assert_eq!(length.kind.name(), "linear");
        assert_eq!(length.kind.units().unwrap().factor("mile").unwrap(), 1609.344);

        assert_eq!(CATALOG.get("color").unwrap().kind, ConverterKind::Color);
        assert!(CATALOG.get("warp-speed").is_none());
    }

    #[test]
    fn test_search() {
        assert_eq!(CATALOG.search("").len(), 27);

        let ids: Vec<_> = CATALOG.search("KELVIN").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["temperature"]);

        // "Currency Converter (Approx)" shows as "Currency" on its card
        assert!(CATALOG.search("approx").is_empty());

        let ids: Vec<_> = CATALOG.search("mile").iter().map(|c| c.id).collect();
        assert!(ids.contains(&"length"));
        assert!(ids.contains(&"area"));
        assert!(ids.contains(&"speed"));
    }
}
