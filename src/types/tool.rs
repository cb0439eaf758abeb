//! Provider-neutral tool definitions.
//!
//! A [`ToolSpec`] is the canonical description of one callable function: a
//! (possibly dotted) name, a human-readable description, and a JSON-schema-like
//! parameter block. Provider-specific renderings are always derived from a
//! clone of these values — the canonical definition is never mutated, so the
//! same list can be rendered for several providers without cross-contamination.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Canonical tool definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Function name; may contain `.` to denote a namespaced path.
    pub name: String,
    pub description: String,
    pub parameters: ParamSchema,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ParamSchema::default(),
        }
    }

    /// Check the schema invariant: every required name exists in `properties`.
    pub fn validate(&self) -> Result<(), String> {
        for req in &self.parameters.required {
            if !self.parameters.properties.contains_key(req) {
                return Err(format!(
                    "required parameter '{}' not present in properties of '{}'",
                    req, self.name
                ));
            }
        }
        Ok(())
    }
}

/// Top-level parameter block of a tool (`type` is normalized to `"object"`
/// at render time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSchema {
    #[serde(rename = "type", default = "object_type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: IndexMap<String, ParamSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Default for ParamSchema {
    fn default() -> Self {
        Self {
            schema_type: object_type(),
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }
}

fn object_type() -> String {
    "object".to_string()
}

/// One parameter definition. Recursive: arrays carry `items`, objects carry
/// nested `properties`. Nesting deeper than two levels is tolerated but the
/// fast-path casts in the normalizer only descend as far as the data observed
/// in practice (array-of-array, array-of-object).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Canonical type tag. Absent types render as `"string"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element schema, present when the type is an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ParamSpec>>,
    /// Nested schema, present when the type is an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, ParamSpec>>,
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Vendor keys we do not model; round-tripped untouched so normalization
    /// never loses them. A flattened empty map contributes no keys.
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

impl ParamSpec {
    /// Shorthand for a parameter with just a type tag.
    pub fn typed(param_type: impl Into<String>) -> Self {
        Self {
            param_type: Some(param_type.into()),
            ..Self::default()
        }
    }

    /// Shorthand for a typed parameter with a description.
    pub fn typed_described(
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            param_type: Some(param_type.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Append a note to the description, creating it when absent.
    pub fn push_description_note(&mut self, note: &str) {
        self.description.get_or_insert_with(String::new).push_str(note);
    }
}
