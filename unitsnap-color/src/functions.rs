//! Color functions for the plugin registry

use crate::format::{convert_color, ColorFormat};
use unitsnap_plugin::prelude::*;

// ============ convert_color ============

pub struct ConvertColor;

static CONVERT_COLOR_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("color", "Text", "Color text in the source format"),
    ArgMeta::required("from_format", "Text", "hex, rgb or hsl"),
    ArgMeta::required("to_format", "Text", "hex, rgb or hsl"),
];

static CONVERT_COLOR_EXAMPLES: [&str; 3] = [
    "convert_color(\"#FF5733\", \"hex\", \"rgb\") → \"rgb(255, 87, 51)\"",
    "convert_color(\"#FF5733\", \"hex\", \"hsl\") → \"hsl(11, 100%, 60%)\"",
    "convert_color(\"0, 100%, 50%\", \"hsl\", \"hex\") → \"#ff0000\"",
];

static CONVERT_COLOR_RELATED: [&str; 1] = ["color_info"];

impl FunctionPlugin for ConvertColor {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_color",
            description: "Convert a color between HEX, RGB and HSL notation",
            usage: "convert_color(color, from_format, to_format)",
            args: &CONVERT_COLOR_ARGS,
            returns: "Text",
            examples: &CONVERT_COLOR_EXAMPLES,
            category: "color",
            related: &CONVERT_COLOR_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 3, "convert_color")?;
            let color = require_text(&args[0], "convert_color", "color")?;
            let from = require_text(&args[1], "convert_color", "from_format")?;
            let to = require_text(&args[2], "convert_color", "to_format")?;
            Ok(Value::Text(convert_color(color, from, to)?))
        };
        run().into()
    }
}

// ============ color_info ============

pub struct ColorInfo;

static COLOR_INFO_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("color", "Text", "Color text"),
    ArgMeta::optional("format", "Text", "hex, rgb or hsl", "hex"),
];

static COLOR_INFO_EXAMPLES: [&str; 1] =
    ["color_info(\"#abc\") → {hex: \"#aabbcc\", r: 170, g: 187, b: 204, h: 210, s: 25, l: 73}"];

static COLOR_INFO_RELATED: [&str; 1] = ["convert_color"];

impl FunctionPlugin for ColorInfo {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "color_info",
            description: "Break a color into its HEX, RGB and HSL components",
            usage: "color_info(color, [format])",
            args: &COLOR_INFO_ARGS,
            returns: "Object",
            examples: &COLOR_INFO_EXAMPLES,
            category: "color",
            related: &COLOR_INFO_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "color_info")?;
            let color = require_text(&args[0], "color_info", "color")?;
            let format: ColorFormat = match args.get(1) {
                None | Some(Value::Null) => ColorFormat::Hex,
                Some(v) => require_text(v, "color_info", "format")?.parse()?,
            };

            let rgb = format.parse(color)?;
            let hsl = rgb.to_hsl();
            Ok(Value::object([
                ("hex", Value::from(rgb.to_hex())),
                ("r", Value::from(i64::from(rgb.r))),
                ("g", Value::from(i64::from(rgb.g))),
                ("b", Value::from(i64::from(rgb.b))),
                ("h", Value::from(i64::from(hsl.h))),
                ("s", Value::from(i64::from(hsl.s))),
                ("l", Value::from(i64::from(hsl.l))),
            ]))
        };
        run().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_color() {
        let args = [Value::from("#FF5733"), Value::from("hex"), Value::from("rgb")];
        assert_eq!(ConvertColor.call(&args, &EvalContext::default()), Value::from("rgb(255, 87, 51)"));

        let args = [Value::from("nope"), Value::from("hex"), Value::from("rgb")];
        let result = ConvertColor.call(&args, &EvalContext::default());
        assert_eq!(result.as_error().unwrap().code, "PARSE_ERROR");
    }

    #[test]
    fn test_color_info() {
        let result = ColorInfo.call(&[Value::from("#abc")], &EvalContext::default());
        let info = result.as_object().unwrap();
        assert_eq!(info["hex"], Value::from("#aabbcc"));
        assert_eq!(info["r"], Value::Number(170.0));
        assert_eq!(info["b"], Value::Number(204.0));

        let args = [Value::from("255, 0, 0"), Value::from("rgb")];
        let result = ColorInfo.call(&args, &EvalContext::default());
        assert_eq!(result.as_object().unwrap()["h"], Value::Number(0.0));
    }
}
