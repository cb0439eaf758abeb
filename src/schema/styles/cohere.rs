//! Cohere rendering — `parameter_definitions` with per-parameter required
//! flags.
//!
//! Cohere's schema is the lossiest target: nested `items`/`properties` have
//! no structural home, so they are folded into description text, and the
//! tool-level `required` set becomes a boolean on each parameter.

use serde_json::{json, Value as JsonValue};

use super::StyleRenderer;
use crate::types::ToolSpec;
use crate::utils::pyliteral::{py_repr, py_str};

pub struct CohereRenderer;

impl StyleRenderer for CohereRenderer {
    fn finalize(&self, mut tool: ToolSpec) -> JsonValue {
        let required = std::mem::take(&mut tool.parameters.required);

        let mut definitions = serde_json::Map::new();
        for (name, spec) in tool.parameters.properties.iter_mut() {
            if spec.description.is_none() {
                spec.description = Some(String::new());
            }
            if let Some(default) = spec.default.take() {
                spec.push_description_note(&format!(
                    " The default value is: {}",
                    py_str(&default)
                ));
            }
            if let Some(additional) = spec.additional_properties.take() {
                spec.push_description_note(&format!(
                    " Additional properties: {}",
                    py_str(&additional)
                ));
            }
            if let Some(items) = spec.items.take() {
                let rendered = serde_json::to_value(&*items).unwrap_or(JsonValue::Null);
                spec.push_description_note(&format!(" List Items type: {}", py_repr(&rendered)));
            }
            if let Some(properties) = spec.properties.take() {
                let rendered = serde_json::to_value(&properties).unwrap_or(JsonValue::Null);
                spec.push_description_note(&format!(
                    " Dictionary properties: {}",
                    py_repr(&rendered)
                ));
            }

            let mut definition = serde_json::to_value(&*spec).unwrap_or(JsonValue::Null);
            if let Some(map) = definition.as_object_mut() {
                map.insert(
                    "required".to_string(),
                    JsonValue::Bool(required.iter().any(|r| r == name)),
                );
            }
            definitions.insert(name.clone(), definition);
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "parameter_definitions": definitions,
        })
    }
}
