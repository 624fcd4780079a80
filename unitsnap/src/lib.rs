//! UnitSnap - unit conversion toolkit
//!
//! A static catalog of converters paired with pure conversion functions,
//! plus the state a front end needs around them (history, theme, open
//! converter).
//!
//! ```
//! use unitsnap::{ConvertParams, Snap};
//!
//! let snap = Snap::with_standard_library();
//! let miles = snap.convert("length", "10", "kilometer", "mile", &ConvertParams::default()).unwrap();
//! assert_eq!(snap.format(&miles), "6.21371");
//! ```

mod convert;
mod history;
mod state;
mod storage;

pub use convert::{
    conversion_info, display, run_conversion, Conversion, ConversionRequest, ConvertParams, INVALID_INPUT,
};
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use state::{AppState, Theme};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, HISTORY_KEY, THEME_KEY};

pub use unitsnap_core::{ConversionError, SnapError, Value};
pub use unitsnap_plugin::{EvalContext, PluginRegistry};
pub use unitsnap_units::{Catalog, ConverterDescriptor, ConverterKind, UnitOption, CATALOG};

use std::sync::Arc;
use tracing::debug;

/// Registry with every conversion library loaded
pub fn standard_registry() -> PluginRegistry {
    let registry = PluginRegistry::new();
    let registry = unitsnap_units::load_units_library(registry);
    let registry = unitsnap_numerals::load_numerals_library(registry);
    let registry = unitsnap_text::load_text_library(registry);
    unitsnap_color::load_color_library(registry)
}

/// Main UnitSnap engine
#[derive(Debug, Clone)]
pub struct Snap {
    registry: Arc<PluginRegistry>,
    context: EvalContext,
}

impl Snap {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            context: EvalContext::default(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.context = self.context.with_precision(precision);
        self
    }

    pub fn with_base_font_size(mut self, size: f64) -> Self {
        self.context = self.context.with_base_font_size(size);
        self
    }

    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    pub fn catalog(&self) -> &'static Catalog {
        &CATALOG
    }

    pub fn converter(&self, id: &str) -> Result<&'static ConverterDescriptor, SnapError> {
        CATALOG
            .get(id)
            .ok_or_else(|| SnapError::not_found("converter", id).with_suggestion("Use list_converters to see every id"))
    }

    /// Converters matching `query` by keyword or title; all for an empty query
    pub fn search(&self, query: &str) -> Vec<&'static ConverterDescriptor> {
        CATALOG.search(query)
    }

    /// Convert raw input with the converter named `id`.
    ///
    /// Numeric results come back unrounded; use [`Snap::format`] to render
    /// them.
    pub fn convert(
        &self,
        id: &str,
        input: &str,
        from: &str,
        to: &str,
        params: &ConvertParams,
    ) -> Result<Value, SnapError> {
        let request = ConversionRequest::new(id, input, from, to);
        self.convert_request(&request, params).map(|c| c.value)
    }

    /// Convert and keep the presentation details: display text, info
    /// line, quick comparison and color preview
    pub fn convert_request(&self, request: &ConversionRequest, params: &ConvertParams) -> Result<Conversion, SnapError> {
        let descriptor = self.converter(&request.converter)?;
        let result = run_conversion(descriptor, request, params, &self.context);
        if let Err(e) = &result {
            debug!(converter = descriptor.id, code = %e.code, "conversion failed");
        }
        result
    }

    /// Render a result value with the configured precision
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => {
                unitsnap_core::format_number(*n, self.context.precision).unwrap_or_else(|| INVALID_INPUT.to_string())
            }
            Value::Error(_) => INVALID_INPUT.to_string(),
            other => other.to_string(),
        }
    }

    /// Call a registered function by name
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.registry.call_function(name, args, &self.context)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }
}

impl Default for Snap {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_examples() {
        let snap = Snap::default();
        let params = ConvertParams::default();
        let convert = |id: &str, input: &str, from: &str, to: &str| snap.convert(id, input, from, to, &params).unwrap();

        assert_eq!(convert("temperature", "0", "celsius", "fahrenheit"), Value::Number(32.0));
        assert_eq!(convert("temperature", "100", "celsius", "kelvin"), Value::Number(373.15));
        assert_eq!(convert("number-base", "1010", "binary", "decimal"), Value::from("10"));
        assert_eq!(convert("numerals", "0", "number", "words"), Value::from("zero"));
        assert_eq!(convert("morse-code", "... --- ...", "morse", "text"), Value::from("SOS"));
        assert_eq!(convert("fuel-economy", "10", "km-per-liter", "liter-per-100km"), Value::Number(10.0));
    }

    #[test]
    fn test_unknown_converter() {
        let snap = Snap::default();
        let err = snap.convert("warp", "1", "a", "b", &ConvertParams::default()).unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[test]
    fn test_format_uses_context_precision() {
        let snap = Snap::default().with_precision(3);
        let value = snap.convert("length", "10", "kilometer", "mile", &ConvertParams::default()).unwrap();
        assert_eq!(snap.format(&value), "6.21");
        assert_eq!(snap.format(&Value::from("MCMXCIV")), "MCMXCIV");
    }

    #[test]
    fn test_context_base_font_size() {
        let snap = Snap::default().with_base_font_size(20.0);
        let px = snap.convert("typography", "2", "em", "px", &ConvertParams::default()).unwrap();
        assert_eq!(px, Value::Number(40.0));
    }

    #[test]
    fn test_standard_registry_functions() {
        let snap = Snap::default();
        for name in [
            "convert", "convert_temperature", "convert_fuel_economy", "convert_typography", "quick_compare",
            "format_number", "convert_base", "to_roman", "from_roman", "to_words", "from_words", "change_case",
            "encode_text", "to_morse", "from_morse", "convert_color", "color_info",
        ] {
            assert!(!snap.help(Some(name)).is_error(), "{} is not registered", name);
        }
        assert_eq!(snap.call("to_roman", &[Value::from(1994.0)]), Value::from("MCMXCIV"));
        assert!(snap.call("to_klingon", &[]).is_error());
    }

    #[test]
    fn test_registry_and_facade_agree() {
        let snap = Snap::default();
        let direct = snap.convert("length", "1", "mile", "meter", &ConvertParams::default()).unwrap();
        let args = [Value::from(1.0), Value::from("length"), Value::from("mile"), Value::from("meter")];
        let dynamic = snap.call("convert", &args);
        assert_eq!(direct, Value::Number(1609.344));
        assert_eq!(dynamic, direct);
    }

    #[test]
    fn test_search() {
        let snap = Snap::default();
        assert_eq!(snap.search("").len(), snap.catalog().len());
        assert_eq!(snap.search("morse")[0].id, "morse-code");
    }
}
