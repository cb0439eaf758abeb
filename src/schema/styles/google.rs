//! Gemini rendering.
//!
//! Gemini's function declarations do not accept several optional fields, so
//! their information is folded into the description text (or simply dropped
//! for `optional`/`maximum`) before the tool is emitted flat.

use serde_json::Value as JsonValue;

use super::StyleRenderer;
use crate::types::ToolSpec;
use crate::utils::pyliteral::py_str;

pub struct GoogleRenderer;

impl StyleRenderer for GoogleRenderer {
    fn finalize(&self, mut tool: ToolSpec) -> JsonValue {
        for spec in tool.parameters.properties.values_mut() {
            if let Some(default) = spec.default.take() {
                spec.push_description_note(&format!("The Default is:{}", py_str(&default)));
            }
            spec.optional = None;
            spec.maximum = None;
            if let Some(additional) = spec.additional_properties.take() {
                spec.push_description_note(&format!(
                    "The additional properties:{}",
                    py_str(&additional)
                ));
            }
        }
        serde_json::to_value(&tool).unwrap_or(JsonValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsupported_fields_folded_or_dropped() {
        let tool: ToolSpec = serde_json::from_value(json!({
            "name": "t",
            "description": "d",
            "parameters": {
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Max results.",
                        "default": 10,
                        "maximum": 50,
                        "optional": true
                    }
                }
            }
        }))
        .unwrap();
        let doc = GoogleRenderer.finalize(tool);
        let limit = &doc["parameters"]["properties"]["limit"];
        assert_eq!(limit["description"], "Max results.The Default is:10");
        assert!(limit.get("default").is_none());
        assert!(limit.get("maximum").is_none());
        assert!(limit.get("optional").is_none());
    }

    #[test]
    fn test_additional_properties_folded() {
        let tool: ToolSpec = serde_json::from_value(json!({
            "name": "t",
            "description": "d",
            "parameters": {
                "type": "object",
                "properties": {
                    "opts": {
                        "type": "object",
                        "description": "Options.",
                        "additionalProperties": {"type": "string"}
                    }
                }
            }
        }))
        .unwrap();
        let doc = GoogleRenderer.finalize(tool);
        assert_eq!(
            doc["parameters"]["properties"]["opts"]["description"],
            "Options.The additional properties:{'type': 'string'}"
        );
    }
}
