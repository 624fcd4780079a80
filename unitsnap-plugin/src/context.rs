//! Evaluation Context

use unitsnap_core::DEFAULT_PRECISION;

/// Default root font size in pixels for typography conversions
pub const DEFAULT_BASE_FONT_SIZE: f64 = 16.0;

/// Settings passed to every plugin call
#[derive(Debug, Clone, PartialEq)]
pub struct EvalContext {
    /// Significant digits used when formatting numeric results
    pub precision: u32,
    /// Pixels per rem/em
    pub base_font_size: f64,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_base_font_size(mut self, size: f64) -> Self {
        self.base_font_size = size;
        self
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
