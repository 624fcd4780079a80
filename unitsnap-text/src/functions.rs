//! Text functions for the plugin registry

use crate::case::convert_text_case;
use crate::encoding::convert_encoding;
use crate::morse::{morse_to_text, morse_to_text_strict, text_to_morse, text_to_morse_strict};
use unitsnap_plugin::prelude::*;

fn optional_bool(args: &[Value], index: usize, func: &str, arg: &str) -> Result<bool, SnapError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(SnapError::arg_type(func, arg, "Bool", other.type_name())),
    }
}

// ============ change_case ============

pub struct ChangeCase;

static CHANGE_CASE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("text", "Text", "Text to transform"),
    ArgMeta::required("case", "Text", "uppercase, lowercase, title or sentence"),
];

static CHANGE_CASE_EXAMPLES: [&str; 2] = [
    "change_case(\"hello world\", \"title\") → \"Hello World\"",
    "change_case(\"hELLO\", \"sentence\") → \"Hello\"",
];

static CHANGE_CASE_RELATED: [&str; 1] = ["encode_text"];

impl FunctionPlugin for ChangeCase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "change_case",
            description: "Change letter case; an unknown case returns the text unchanged",
            usage: "change_case(text, case)",
            args: &CHANGE_CASE_ARGS,
            returns: "Text",
            examples: &CHANGE_CASE_EXAMPLES,
            category: "text",
            related: &CHANGE_CASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 2, "change_case")?;
            let text = require_text(&args[0], "change_case", "text")?;
            let case = require_text(&args[1], "change_case", "case")?;
            Ok(Value::Text(convert_text_case(text, case)))
        };
        run().into()
    }
}

// ============ encode_text ============

pub struct EncodeText;

static ENCODE_TEXT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("text", "Text", "Text to encode or decode"),
    ArgMeta::required("operation", "Text", "base64-encode, base64-decode, url-encode or url-decode"),
];

static ENCODE_TEXT_EXAMPLES: [&str; 3] = [
    "encode_text(\"Hello\", \"base64-encode\") → \"SGVsbG8=\"",
    "encode_text(\"SGVsbG8=\", \"base64-decode\") → \"Hello\"",
    "encode_text(\"a b\", \"url-encode\") → \"a%20b\"",
];

static ENCODE_TEXT_RELATED: [&str; 1] = ["change_case"];

impl FunctionPlugin for EncodeText {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "encode_text",
            description: "Encode or decode UTF-8 text as Base64 or URL percent-encoding",
            usage: "encode_text(text, operation)",
            args: &ENCODE_TEXT_ARGS,
            returns: "Text",
            examples: &ENCODE_TEXT_EXAMPLES,
            category: "text",
            related: &ENCODE_TEXT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 2, "encode_text")?;
            let text = require_text(&args[0], "encode_text", "text")?;
            let operation = require_text(&args[1], "encode_text", "operation")?;
            Ok(Value::Text(convert_encoding(text, operation)?))
        };
        run().into()
    }
}

// ============ to_morse ============

pub struct ToMorse;

static TO_MORSE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("text", "Text", "Letters, digits and spaces"),
    ArgMeta::optional("strict", "Bool", "Fail on characters without a code", "false"),
];

static TO_MORSE_EXAMPLES: [&str; 2] = ["to_morse(\"SOS\") → \"... --- ...\"", "to_morse(\"a!\", true) → error"];

static TO_MORSE_RELATED: [&str; 1] = ["from_morse"];

impl FunctionPlugin for ToMorse {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_morse",
            description: "Encode text as Morse code",
            usage: "to_morse(text, [strict])",
            args: &TO_MORSE_ARGS,
            returns: "Text",
            examples: &TO_MORSE_EXAMPLES,
            category: "text",
            related: &TO_MORSE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "to_morse")?;
            let text = require_text(&args[0], "to_morse", "text")?;
            let morse = if optional_bool(args, 1, "to_morse", "strict")? {
                text_to_morse_strict(text)?
            } else {
                text_to_morse(text)
            };
            Ok(Value::Text(morse))
        };
        run().into()
    }
}

// ============ from_morse ============

pub struct FromMorse;

static FROM_MORSE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("morse", "Text", "Space-separated codes, '/' between words"),
    ArgMeta::optional("strict", "Bool", "Fail on unknown codes", "false"),
];

static FROM_MORSE_EXAMPLES: [&str; 1] = ["from_morse(\"... --- ...\") → \"SOS\""];

static FROM_MORSE_RELATED: [&str; 1] = ["to_morse"];

impl FunctionPlugin for FromMorse {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "from_morse",
            description: "Decode Morse code to text",
            usage: "from_morse(morse, [strict])",
            args: &FROM_MORSE_ARGS,
            returns: "Text",
            examples: &FROM_MORSE_EXAMPLES,
            category: "text",
            related: &FROM_MORSE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "from_morse")?;
            let morse = require_text(&args[0], "from_morse", "morse")?;
            let text = if optional_bool(args, 1, "from_morse", "strict")? {
                morse_to_text_strict(morse)?
            } else {
                morse_to_text(morse)
            };
            Ok(Value::Text(text))
        };
        run().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: &dyn FunctionPlugin, args: &[Value]) -> Value {
        f.call(args, &EvalContext::default())
    }

    #[test]
    fn test_change_case() {
        let args = [Value::from("hello world"), Value::from("title")];
        assert_eq!(call(&ChangeCase, &args), Value::from("Hello World"));
    }

    #[test]
    fn test_encode_text() {
        let args = [Value::from("Hello"), Value::from("base64-encode")];
        assert_eq!(call(&EncodeText, &args), Value::from("SGVsbG8="));

        let args = [Value::from("%%"), Value::from("url-decode")];
        assert_eq!(call(&EncodeText, &args).as_error().unwrap().code, "PARSE_ERROR");

        let args = [Value::from("x"), Value::from("hex-encode")];
        assert_eq!(call(&EncodeText, &args).as_error().unwrap().code, "UNKNOWN_UNIT");
    }

    #[test]
    fn test_morse_strict_flag() {
        assert_eq!(call(&ToMorse, &[Value::from("a!")]), Value::from(".-"));

        let result = call(&ToMorse, &[Value::from("a!"), Value::Bool(true)]);
        assert_eq!(result.as_error().unwrap().code, "PARSE_ERROR");

        let result = call(&FromMorse, &[Value::from("..."), Value::from("yes")]);
        assert_eq!(result.as_error().unwrap().code, "ARG_TYPE");
    }
}
