//! Python-flavoured literal rendering of JSON values.
//!
//! Provider conventions that fold structured fields into description text, and
//! the executable-call renderer, both print values the way the target
//! language's own `repr`/`str` would: single-quoted strings, `True`/`False`,
//! `None`, and `{'key': value}` dictionaries.

use serde_json::Value as JsonValue;

/// `repr()`-style rendering: strings are quoted.
pub(crate) fn py_repr(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "None".to_string(),
        JsonValue::Bool(true) => "True".to_string(),
        JsonValue::Bool(false) => "False".to_string(),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if f.is_finite() && f.fract() == 0.0 {
                    format!("{:.1}", f)
                } else {
                    f.to_string()
                }
            }
        }
        JsonValue::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        JsonValue::Array(items) => {
            let body = items.iter().map(py_repr).collect::<Vec<_>>().join(", ");
            format!("[{}]", body)
        }
        JsonValue::Object(map) => {
            let body = map
                .iter()
                .map(|(k, v)| format!("'{}': {}", k.replace('\'', "\\'"), py_repr(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{}}}", body)
        }
    }
}

/// `str()`-style rendering: top-level strings print bare, everything else
/// falls through to `py_repr`.
pub(crate) fn py_str(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => py_repr(other),
    }
}
