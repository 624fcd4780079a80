//! Base64 and URL percent-encoding of UTF-8 text

use base64::Engine;
use std::str::FromStr;
use unitsnap_core::{ConversionError, ConversionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64Encode,
    Base64Decode,
    UrlEncode,
    UrlDecode,
}

impl Encoding {
    pub fn apply(self, text: &str) -> ConversionResult<String> {
        match self {
            Self::Base64Encode => Ok(encode_base64(text)),
            Self::Base64Decode => decode_base64(text),
            Self::UrlEncode => Ok(encode_url(text)),
            Self::UrlDecode => decode_url(text),
        }
    }
}

impl FromStr for Encoding {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base64-encode" => Ok(Self::Base64Encode),
            "base64-decode" => Ok(Self::Base64Decode),
            "url-encode" => Ok(Self::UrlEncode),
            "url-decode" => Ok(Self::UrlDecode),
            other => Err(ConversionError::unknown_unit(other)),
        }
    }
}

/// Standard alphabet, padded
pub fn encode_base64(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}

pub fn decode_base64(encoded: &str) -> ConversionResult<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ConversionError::unparseable(format!("invalid Base64: {}", e)))?;
    String::from_utf8(bytes).map_err(|_| ConversionError::unparseable("decoded Base64 is not UTF-8 text"))
}

pub fn encode_url(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Decode percent-escapes. A `%` not followed by two hex digits is an
/// error rather than being kept literally.
pub fn decode_url(encoded: &str) -> ConversionResult<String> {
    let bytes = encoded.as_bytes();
    for (i, _) in encoded.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(ConversionError::unparseable(format!("malformed escape at position {}", i)));
        }
    }

    urlencoding::decode(encoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ConversionError::unparseable("decoded URL text is not UTF-8"))
}

/// Apply the operation named by `operation`
pub fn convert_encoding(text: &str, operation: &str) -> ConversionResult<String> {
    operation.parse::<Encoding>()?.apply(text)
}
