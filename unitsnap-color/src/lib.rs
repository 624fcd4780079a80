//! UnitSnap Color - HEX, RGB and HSL
//!
//! All conversions pivot through 8-bit RGB. HSL components are whole
//! degrees and percentages.

mod format;
mod functions;
mod space;

pub use format::{convert_color, hex_to_rgb, parse_hsl, parse_rgb, rgb_to_hex, ColorFormat};
pub use space::{Hsl, Rgb};

use unitsnap_plugin::PluginRegistry;

/// Load color functions into registry
pub fn load_color_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::ConvertColor)
        .with_function(functions::ColorInfo)
}
