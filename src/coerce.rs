//! Best-effort typed coercion of raw parameter text.
//!
//! Tag-extracted parameter values carry no type information of their own; the
//! caller looks up the declared type in the original tool definition and asks
//! this module to convert. Coercion is total: any conversion failure returns
//! the original text unchanged rather than erroring, so a sloppy completion
//! still scores on whatever fields did convert.
//!
//! The finite set of supported type names is an explicit enumeration — the
//! default branch, not a reflective type lookup, handles everything else.

use crate::parser;
use crate::types::Value;

/// Convert `raw` into a typed [`Value`] according to `type_name`.
///
/// `list`/`dict`/`tuple` attempt a literal-structure parse; primitives use
/// their own constructors; `string` is an alias for the text type. Unknown
/// type names and failed conversions return `raw` unchanged.
pub fn coerce(raw: &str, type_name: &str) -> Value {
    match type_name {
        "list" | "dict" | "tuple" | "array" | "object" => {
            match parser::parse_python_literal(raw) {
                Ok(value) => value,
                Err(_) => Value::Str(raw.to_string()),
            }
        }
        "int" | "integer" => match raw.trim().parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Str(raw.to_string()),
        },
        "float" | "number" => match raw.trim().parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => Value::Str(raw.to_string()),
        },
        // Explicit literal matching instead of the source language's
        // truthiness-of-any-nonempty-string behavior.
        "bool" | "boolean" => match raw.trim() {
            "True" | "true" => Value::Bool(true),
            "False" | "false" => Value::Bool(false),
            _ => Value::Str(raw.to_string()),
        },
        "str" | "string" => Value::Str(raw.to_string()),
        other => {
            tracing::debug!(type_name = other, "unknown coercion type, keeping raw text");
            Value::Str(raw.to_string())
        }
    }
}
