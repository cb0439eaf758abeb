//! Executable call-string rendering.
//!
//! Turns decoded provider tool calls — `(function_name, json-encoded
//! argument object)` pairs, the shape structured tool-call APIs return —
//! into `name(key=value,...)` strings using the target language's literal
//! conventions. The strings are consumed by an external execution/scoring
//! collaborator.

use serde_json::Value as JsonValue;

use crate::error::Error;
use crate::types::CallRecord;
use crate::utils::pyliteral::py_repr;

/// Render one executable call string per `(name, json_arguments)` pair.
///
/// Fails when an argument payload is not valid JSON; that is a malformed
/// provider response and must surface rather than yield a bogus call.
pub fn to_execution_strings(calls: &[(String, String)]) -> Result<Vec<String>, Error> {
    calls
        .iter()
        .map(|(name, json_arguments)| {
            let arguments: JsonValue = serde_json::from_str(json_arguments)?;
            let rendered = arguments
                .as_object()
                .map(|map| {
                    map.iter()
                        .map(|(key, value)| format!("{}={}", key, py_repr(value)))
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_default();
            Ok(format!("{}({})", name, rendered))
        })
        .collect()
}

/// Render a parsed [`CallRecord`] back into an executable call string.
pub fn render_call_record(record: &CallRecord) -> String {
    let arguments = record
        .arguments
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.to_source_string()))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}({})", record.function_name, arguments)
}
