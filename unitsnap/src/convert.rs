//! Dispatch of a conversion request to its engine family

use serde::Serialize;
use tracing::trace;
use unitsnap_color::ColorFormat;
use unitsnap_core::{format_number, parse_number, whole_number, ConversionError, ConversionResult, SnapError, Value};
use unitsnap_plugin::EvalContext;
use unitsnap_units::{
    convert_fuel_economy, convert_linear, convert_temperature, convert_typography, quick_compare, Comparison,
    ConverterDescriptor, ConverterKind, UnitTable,
};

/// Shown in place of a result whenever a conversion fails
pub const INVALID_INPUT: &str = "Invalid input";

/// Raw user input plus selected unit keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    pub converter: String,
    pub input: String,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(
        converter: impl Into<String>,
        input: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            converter: converter.into(),
            input: input.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Same request with the unit selectors exchanged
    pub fn swapped(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            ..self.clone()
        }
    }
}

/// Per-request overrides of the context
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConvertParams {
    /// Pixels per rem/em for typography
    pub base_font_size: Option<f64>,
}

impl ConvertParams {
    pub fn with_base_font_size(mut self, size: f64) -> Self {
        self.base_font_size = Some(size);
        self
    }
}

/// Successful conversion with everything needed to present it
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Unrounded number or text result
    pub value: Value,
    /// Result as displayed
    pub text: String,
    /// `"{input} {from name} = {result} {to name}"`
    pub info: String,
    /// The value in other units of the table (linear converters only)
    pub compare: Vec<Comparison>,
    /// `#rrggbb` of the converted color (color converter only)
    pub preview: Option<String>,
}

/// Result as shown to a user: the text, or [`INVALID_INPUT`] for any error
pub fn display(result: &Result<Conversion, SnapError>) -> &str {
    match result {
        Ok(conversion) => &conversion.text,
        Err(_) => INVALID_INPUT,
    }
}

/// Whole-number input; fractions are truncated toward zero
fn parse_integer(input: &str) -> ConversionResult<i64> {
    parse_number(input).and_then(whole_number)
}

/// Reject selector keys that are not offered by the converter
fn check_option(kind: &ConverterKind, key: &str) -> ConversionResult<()> {
    if kind.unit_options().iter().any(|o| o.key == key) {
        Ok(())
    } else {
        Err(ConversionError::unknown_unit(key))
    }
}

/// Intermediate result of one engine family
struct Outcome {
    value: Value,
    text: String,
    compare: Vec<Comparison>,
    preview: Option<String>,
}

impl Outcome {
    fn text(text: String) -> Self {
        Self { value: Value::Text(text.clone()), text, compare: Vec::new(), preview: None }
    }

    fn integer(n: i64) -> Self {
        Self { value: Value::from(n), text: n.to_string(), compare: Vec::new(), preview: None }
    }

    fn number(n: f64, precision: u32) -> ConversionResult<Self> {
        let text = format_number(n, precision)
            .ok_or_else(|| ConversionError::domain("result is not a finite number"))?;
        Ok(Self { value: Value::Number(n), text, compare: Vec::new(), preview: None })
    }
}

fn linear(units: &UnitTable, request: &ConversionRequest, ctx: &EvalContext) -> ConversionResult<Outcome> {
    let value = parse_number(&request.input)?;
    let result = convert_linear(value, &request.from, &request.to, units)?;
    let mut outcome = Outcome::number(result, ctx.precision)?;
    outcome.compare = quick_compare(value, &request.from, units, ctx.precision)?;
    Ok(outcome)
}

fn roman(request: &ConversionRequest, kind: &ConverterKind) -> ConversionResult<Outcome> {
    check_option(kind, &request.from)?;
    check_option(kind, &request.to)?;
    match (request.from.as_str(), request.to.as_str()) {
        ("decimal", "roman") => Ok(Outcome::text(unitsnap_numerals::decimal_to_roman(parse_integer(&request.input)?)?)),
        ("roman", "decimal") => Ok(Outcome::integer(unitsnap_numerals::roman_to_decimal(&request.input)?)),
        _ => Ok(Outcome::text(request.input.clone())),
    }
}

fn numerals(request: &ConversionRequest, kind: &ConverterKind) -> ConversionResult<Outcome> {
    check_option(kind, &request.from)?;
    check_option(kind, &request.to)?;
    match (request.from.as_str(), request.to.as_str()) {
        ("number", "words") => Ok(Outcome::text(unitsnap_numerals::number_to_words(parse_integer(&request.input)?)?)),
        ("words", "number") => Ok(Outcome::integer(unitsnap_numerals::words_to_number(&request.input)?)),
        _ => Ok(Outcome::text(request.input.clone())),
    }
}

fn morse(request: &ConversionRequest, kind: &ConverterKind) -> ConversionResult<Outcome> {
    check_option(kind, &request.from)?;
    check_option(kind, &request.to)?;
    match (request.from.as_str(), request.to.as_str()) {
        ("text", "morse") => Ok(Outcome::text(unitsnap_text::text_to_morse(&request.input))),
        ("morse", "text") => Ok(Outcome::text(unitsnap_text::morse_to_text(&request.input))),
        _ => Ok(Outcome::text(request.input.clone())),
    }
}

fn color(request: &ConversionRequest) -> ConversionResult<Outcome> {
    let from: ColorFormat = request.from.parse()?;
    let to: ColorFormat = request.to.parse()?;
    let rgb = from.parse(&request.input)?;
    let mut outcome = Outcome::text(to.render(rgb));
    outcome.preview = Some(rgb.to_hex());
    Ok(outcome)
}

fn dispatch(
    descriptor: &ConverterDescriptor,
    request: &ConversionRequest,
    params: &ConvertParams,
    ctx: &EvalContext,
) -> ConversionResult<Outcome> {
    let kind = &descriptor.kind;
    let (from, to) = (request.from.as_str(), request.to.as_str());
    match kind {
        ConverterKind::Linear { units } => linear(units, request, ctx),
        ConverterKind::Temperature => {
            let value = parse_number(&request.input)?;
            Outcome::number(convert_temperature(value, from, to)?, ctx.precision)
        }
        ConverterKind::FuelEconomy => {
            let value = parse_number(&request.input)?;
            Outcome::number(convert_fuel_economy(value, from, to)?, ctx.precision)
        }
        ConverterKind::Typography => {
            let value = parse_number(&request.input)?;
            let base = params.base_font_size.unwrap_or(ctx.base_font_size);
            Outcome::number(convert_typography(value, from, to, base)?, ctx.precision)
        }
        ConverterKind::NumberBase => {
            Ok(Outcome::text(unitsnap_numerals::convert_number_base(&request.input, from, to)?))
        }
        ConverterKind::RomanNumerals => roman(request, kind),
        // Only the target selector matters for text case and encoding
        ConverterKind::TextCase => {
            let case: unitsnap_text::TextCase = to.parse()?;
            Ok(Outcome::text(case.apply(&request.input)))
        }
        ConverterKind::Encoding => Ok(Outcome::text(unitsnap_text::convert_encoding(&request.input, to)?)),
        ConverterKind::Color => color(request),
        ConverterKind::Numerals => numerals(request, kind),
        ConverterKind::MorseCode => morse(request, kind),
    }
}

/// Display name of a selector key, falling back to the key
fn option_name(kind: &ConverterKind, key: &str) -> String {
    kind.unit_options()
        .into_iter()
        .find(|o| o.key == key)
        .map_or_else(|| key.to_string(), |o| o.name.to_string())
}

/// `"{input} {from name} = {result} {to name}"`
pub fn conversion_info(descriptor: &ConverterDescriptor, request: &ConversionRequest, result: &str) -> String {
    format!(
        "{} {} = {} {}",
        request.input.trim(),
        option_name(&descriptor.kind, &request.from),
        result,
        option_name(&descriptor.kind, &request.to)
    )
}

/// Run `request` against `descriptor`
pub fn run_conversion(
    descriptor: &ConverterDescriptor,
    request: &ConversionRequest,
    params: &ConvertParams,
    ctx: &EvalContext,
) -> Result<Conversion, SnapError> {
    trace!(converter = descriptor.id, kind = descriptor.kind.name(), "dispatching conversion");
    let outcome = dispatch(descriptor, request, params, ctx)?;
    let info = conversion_info(descriptor, request, &outcome.text);
    Ok(Conversion {
        value: outcome.value,
        text: outcome.text,
        info,
        compare: outcome.compare,
        preview: outcome.preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitsnap_units::CATALOG;

    fn run(id: &str, input: &str, from: &str, to: &str) -> Result<Conversion, SnapError> {
        let descriptor = CATALOG.get(id).unwrap();
        let request = ConversionRequest::new(id, input, from, to);
        run_conversion(descriptor, &request, &ConvertParams::default(), &EvalContext::default())
    }

    fn text(id: &str, input: &str, from: &str, to: &str) -> String {
        run(id, input, from, to).unwrap().text
    }

    #[test]
    fn test_every_family_dispatches() {
        assert_eq!(text("length", "10", "kilometer", "mile"), "6.21371");
        assert_eq!(text("temperature", "100", "celsius", "kelvin"), "373.15");
        assert_eq!(text("number-base", "FF", "hexadecimal", "decimal"), "255");
        assert_eq!(text("fuel-economy", "10", "km-per-liter", "liter-per-100km"), "10");
        assert_eq!(text("typography", "2", "rem", "px"), "32");
        assert_eq!(text("roman-numerals", "1994", "decimal", "roman"), "MCMXCIV");
        assert_eq!(text("roman-numerals", "MCMXCIV", "roman", "decimal"), "1994");
        assert_eq!(text("text-case", "hello world", "uppercase", "title"), "Hello World");
        assert_eq!(text("encoding", "Hello", "base64-encode", "base64-encode"), "SGVsbG8=");
        assert_eq!(text("color", "#FF5733", "hex", "rgb"), "rgb(255, 87, 51)");
        assert_eq!(text("numerals", "one million", "words", "number"), "1000000");
        assert_eq!(text("numerals", "21", "number", "words"), "twenty one");
        assert_eq!(text("morse-code", "SOS", "text", "morse"), "... --- ...");
    }

    #[test]
    fn test_every_family_rejects_unknown_units() {
        for converter in CATALOG.iter() {
            let result = run(converter.id, "1", "no-such-unit", "no-such-unit");
            assert!(result.is_err(), "{} accepted an unknown unit", converter.id);
        }
    }

    #[test]
    fn test_identity_pairs_echo_input() {
        assert_eq!(text("roman-numerals", "xiv", "roman", "roman"), "xiv");
        assert_eq!(text("morse-code", "abc", "text", "text"), "abc");
    }

    #[test]
    fn test_number_results_keep_raw_value() {
        let conversion = run("length", "1", "mile", "meter").unwrap();
        assert_eq!(conversion.value, Value::Number(1609.344));
        assert_eq!(conversion.compare.len(), 3);
        assert_eq!(conversion.info, "1 Mile (mi) = 1609.34 Meter (m)");
    }

    #[test]
    fn test_color_preview() {
        let conversion = run("color", "0, 100%, 50%", "hsl", "rgb").unwrap();
        assert_eq!(conversion.text, "rgb(255, 0, 0)");
        assert_eq!(conversion.preview.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_typography_base_override() {
        let descriptor = CATALOG.get("typography").unwrap();
        let request = ConversionRequest::new("typography", "2", "rem", "px");
        let params = ConvertParams::default().with_base_font_size(10.0);
        let conversion = run_conversion(descriptor, &request, &params, &EvalContext::default()).unwrap();
        assert_eq!(conversion.text, "20");
    }

    #[test]
    fn test_display_hides_error_kind() {
        let bad_number = run("length", "abc", "meter", "mile");
        let bad_unit = run("length", "1", "meter", "league");
        let bad_domain = run("roman-numerals", "0", "decimal", "roman");
        for result in [&bad_number, &bad_unit, &bad_domain] {
            assert_eq!(display(result), INVALID_INPUT);
        }
        assert_eq!(bad_number.unwrap_err().code, "PARSE_ERROR");
        assert_eq!(bad_unit.unwrap_err().code, "UNKNOWN_UNIT");
        assert_eq!(bad_domain.unwrap_err().code, "DOMAIN_ERROR");
    }

    #[test]
    fn test_swap() {
        let request = ConversionRequest::new("length", "5", "meter", "foot");
        let swapped = request.swapped();
        assert_eq!((swapped.from.as_str(), swapped.to.as_str()), ("foot", "meter"));
        assert_eq!(swapped.swapped(), request);
    }
}
