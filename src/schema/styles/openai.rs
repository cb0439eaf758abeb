//! Function-wrapped rendering — OpenAI-compatible tool documents.
//!
//! Used by OpenAI, Mistral, and Fireworks: each tool is wrapped as
//! `{"type": "function", "function": {...}}`.

use serde_json::{json, Value as JsonValue};

use super::StyleRenderer;
use crate::types::ToolSpec;

pub struct FunctionWrappedRenderer;

impl StyleRenderer for FunctionWrappedRenderer {
    fn finalize(&self, tool: ToolSpec) -> JsonValue {
        let inner = serde_json::to_value(&tool).unwrap_or(JsonValue::Null);
        json!({
            "type": "function",
            "function": inner,
        })
    }
}
