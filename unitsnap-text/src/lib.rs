//! UnitSnap Text - conversions on free text
//!
//! Letter case, Base64 and URL percent-encoding, and Morse code.

mod case;
mod encoding;
mod functions;
mod morse;

pub use case::{convert_text_case, TextCase};
pub use encoding::{convert_encoding, decode_base64, decode_url, encode_base64, encode_url, Encoding};
pub use morse::{morse_to_text, morse_to_text_strict, text_to_morse, text_to_morse_strict};

use unitsnap_plugin::PluginRegistry;

/// Load text functions into registry
pub fn load_text_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::ChangeCase)
        .with_function(functions::EncodeText)
        .with_function(functions::ToMorse)
        .with_function(functions::FromMorse)
}
