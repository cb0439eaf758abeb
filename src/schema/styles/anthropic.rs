//! Anthropic tool-use rendering.
//!
//! The tool-use API takes the same schema body as the neutral form but under
//! an `input_schema` key instead of `parameters`. The legacy tag-grammar
//! prompting convention does not go through a renderer of its own — it uses
//! the flat form plus the prompt constructors in [`crate::prompt`].

use serde_json::Value as JsonValue;

use super::StyleRenderer;
use crate::types::ToolSpec;

pub struct InputSchemaRenderer;

impl StyleRenderer for InputSchemaRenderer {
    fn finalize(&self, tool: ToolSpec) -> JsonValue {
        let mut doc = serde_json::to_value(&tool).unwrap_or(JsonValue::Null);
        if let Some(map) = doc.as_object_mut() {
            if let Some(schema) = map.remove("parameters") {
                map.insert("input_schema".to_string(), schema);
            }
        }
        doc
    }
}
