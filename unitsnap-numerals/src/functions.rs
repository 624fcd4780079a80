//! Numeral functions for the plugin registry

use crate::base::convert_number_base;
use crate::roman::{decimal_to_roman, roman_to_decimal};
use crate::words::{number_to_words, words_to_number};
use unitsnap_core::whole_number;
use unitsnap_plugin::prelude::*;

/// Read an integer argument. Fractions are truncated toward zero, the way
/// whole-number inputs are read everywhere else.
fn require_integer(value: &Value, func: &str, arg: &str) -> Result<i64, SnapError> {
    let n = require_number(value, func, arg)?;
    Ok(whole_number(n)?)
}

// ============ convert_base ============

pub struct ConvertBase;

static CONVERT_BASE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Text", "Integer written in the source base"),
    ArgMeta::required("from_base", "Text", "decimal, binary or hexadecimal"),
    ArgMeta::required("to_base", "Text", "decimal, binary or hexadecimal"),
];

static CONVERT_BASE_EXAMPLES: [&str; 3] = [
    "convert_base(\"FF\", \"hexadecimal\", \"decimal\") → \"255\"",
    "convert_base(\"1010\", \"binary\", \"decimal\") → \"10\"",
    "convert_base(255, \"decimal\", \"binary\") → \"11111111\"",
];

static CONVERT_BASE_RELATED: [&str; 1] = ["to_roman"];

impl FunctionPlugin for ConvertBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_base",
            description: "Rewrite an integer from one number base in another",
            usage: "convert_base(value, from_base, to_base)",
            args: &CONVERT_BASE_ARGS,
            returns: "Text",
            examples: &CONVERT_BASE_EXAMPLES,
            category: "numerals",
            related: &CONVERT_BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 3, "convert_base")?;
            let value = require_raw(&args[0], "convert_base", "value")?;
            let from = require_text(&args[1], "convert_base", "from_base")?;
            let to = require_text(&args[2], "convert_base", "to_base")?;
            Ok(Value::Text(convert_number_base(&value, from, to)?))
        };
        run().into()
    }
}

// ============ to_roman ============

pub struct ToRoman;

static TO_ROMAN_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Number", "Integer from 1 to 3999")];

static TO_ROMAN_EXAMPLES: [&str; 2] = ["to_roman(1994) → \"MCMXCIV\"", "to_roman(4) → \"IV\""];

static TO_ROMAN_RELATED: [&str; 1] = ["from_roman"];

impl FunctionPlugin for ToRoman {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_roman",
            description: "Write an integer as a Roman numeral",
            usage: "to_roman(value)",
            args: &TO_ROMAN_ARGS,
            returns: "Text",
            examples: &TO_ROMAN_EXAMPLES,
            category: "numerals",
            related: &TO_ROMAN_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "to_roman")?;
            let value = require_integer(&args[0], "to_roman", "value")?;
            Ok(Value::Text(decimal_to_roman(value)?))
        };
        run().into()
    }
}

// ============ from_roman ============

pub struct FromRoman;

static FROM_ROMAN_ARGS: [ArgMeta; 1] = [ArgMeta::required("numeral", "Text", "Canonical Roman numeral")];

static FROM_ROMAN_EXAMPLES: [&str; 2] = ["from_roman(\"MCMXCIV\") → 1994", "from_roman(\"xl\") → 40"];

static FROM_ROMAN_RELATED: [&str; 1] = ["to_roman"];

impl FunctionPlugin for FromRoman {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "from_roman",
            description: "Read a Roman numeral as an integer",
            usage: "from_roman(numeral)",
            args: &FROM_ROMAN_ARGS,
            returns: "Number",
            examples: &FROM_ROMAN_EXAMPLES,
            category: "numerals",
            related: &FROM_ROMAN_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "from_roman")?;
            let numeral = require_text(&args[0], "from_roman", "numeral")?;
            Ok(Value::from(roman_to_decimal(numeral)?))
        };
        run().into()
    }
}

// ============ to_words ============

pub struct ToWords;

static TO_WORDS_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Number", "Integer up to 999,999,999 in magnitude")];

static TO_WORDS_EXAMPLES: [&str; 3] = [
    "to_words(0) → \"zero\"",
    "to_words(123) → \"one hundred twenty three\"",
    "to_words(-7) → \"negative seven\"",
];

static TO_WORDS_RELATED: [&str; 1] = ["from_words"];

impl FunctionPlugin for ToWords {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_words",
            description: "Spell out an integer in English words",
            usage: "to_words(value)",
            args: &TO_WORDS_ARGS,
            returns: "Text",
            examples: &TO_WORDS_EXAMPLES,
            category: "numerals",
            related: &TO_WORDS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "to_words")?;
            let value = require_integer(&args[0], "to_words", "value")?;
            Ok(Value::Text(number_to_words(value)?))
        };
        run().into()
    }
}

// ============ from_words ============

pub struct FromWords;

static FROM_WORDS_ARGS: [ArgMeta; 1] = [ArgMeta::required("words", "Text", "English number words")];

static FROM_WORDS_EXAMPLES: [&str; 2] = [
    "from_words(\"one million\") → 1000000",
    "from_words(\"twenty one\") → 21",
];

static FROM_WORDS_RELATED: [&str; 1] = ["to_words"];

impl FunctionPlugin for FromWords {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "from_words",
            description: "Read English number words as an integer",
            usage: "from_words(words)",
            args: &FROM_WORDS_ARGS,
            returns: "Number",
            examples: &FROM_WORDS_EXAMPLES,
            category: "numerals",
            related: &FROM_WORDS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let run = || -> Result<Value, SnapError> {
            require_args(args, 1, "from_words")?;
            let words = require_text(&args[0], "from_words", "words")?;
            Ok(Value::from(words_to_number(words)?))
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
    fn test_convert_base_accepts_numbers() {
        let args = [Value::from(255.0), Value::from("decimal"), Value::from("hexadecimal")];
        assert_eq!(call(&ConvertBase, &args), Value::from("FF"));

        let args = [Value::from("zz"), Value::from("hexadecimal"), Value::from("decimal")];
        assert_eq!(call(&ConvertBase, &args).as_error().unwrap().code, "PARSE_ERROR");
    }

    #[test]
    fn test_roman_functions() {
        assert_eq!(call(&ToRoman, &[Value::from(1994.0)]), Value::from("MCMXCIV"));
        assert_eq!(call(&ToRoman, &[Value::from("12.9")]), Value::from("XII"));
        assert_eq!(call(&ToRoman, &[Value::from(0.0)]).as_error().unwrap().code, "DOMAIN_ERROR");
        assert_eq!(call(&FromRoman, &[Value::from("xiv")]), Value::Number(14.0));
        assert_eq!(call(&FromRoman, &[Value::from(14.0)]).as_error().unwrap().code, "ARG_TYPE");
    }

    #[test]
    fn test_word_functions() {
        assert_eq!(call(&ToWords, &[Value::from(1_000_000.0)]), Value::from("one million"));
        assert_eq!(call(&FromWords, &[Value::from("one million")]), Value::Number(1_000_000.0));
        assert_eq!(call(&FromWords, &[]).as_error().unwrap().code, "ARG_COUNT");
        assert_eq!(call(&ToWords, &[Value::from(1e300)]).as_error().unwrap().code, "DOMAIN_ERROR");
    }
}
