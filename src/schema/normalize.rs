//! Schema normalization: canonical tools to provider-shaped documents.
//!
//! `normalize` is total for structurally valid [`ToolSpec`]s — unknown types
//! and optional fields degrade to safe defaults instead of failing. The
//! canonical input is cloned before any rewriting so that the same tool list
//! can be rendered for several providers in sequence.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::mapper::{TypeMapper, Vocabulary};
use super::styles::{renderer_for, ProviderStyle};
use crate::types::{ParamSpec, ToolSpec};

const FLOAT_NOTE: &str = " This is a float type value.";

/// Render a canonical tool list as one provider-shaped document per tool.
pub fn normalize(
    tools: &[ToolSpec],
    mapper: &TypeMapper,
    style: ProviderStyle,
) -> Vec<JsonValue> {
    let renderer = renderer_for(style);
    tools
        .iter()
        .map(|tool| {
            let mut tool = tool.clone();
            if style.requires_underscore_names() && tool.name.contains('.') {
                // Identifier grammars like ^[a-zA-Z0-9_-]{1,64}$ reject dots.
                tool.name = tool.name.replace('.', "_");
            }
            tool.parameters.schema_type = "object".to_string();
            cast_properties(&mut tool.parameters.properties, mapper);
            renderer.finalize(tool)
        })
        .collect()
}

/// Rewrite every property's type through the mapper, recursing into nested
/// schemas.
pub(crate) fn cast_properties(
    properties: &mut IndexMap<String, ParamSpec>,
    mapper: &TypeMapper,
) {
    for spec in properties.values_mut() {
        cast_spec(spec, mapper);
    }
}

fn cast_spec(spec: &mut ParamSpec, mapper: &TypeMapper) {
    let mapped = match spec.param_type.as_deref() {
        // Missing type degrades to the fallback rather than failing.
        None => mapper.fallback(),
        Some(canonical) => {
            let needs_float_note =
                mapper.vocabulary() == Vocabulary::JsonSchema && canonical == "float";
            let mapped = mapper.map(canonical);
            if needs_float_note {
                spec.format = Some("float".to_string());
                spec.push_description_note(FLOAT_NOTE);
            }
            mapped
        }
    };
    spec.param_type = Some(mapped.to_string());

    if mapped != "array" && mapped != "object" {
        return;
    }

    if let Some(nested) = spec.properties.as_mut() {
        cast_properties(nested, mapper);
    } else if let Some(items) = spec.items.as_mut() {
        let mapped_item = match items.param_type.as_deref() {
            Some(t) => mapper.map(t),
            None => mapper.fallback(),
        }
        .to_string();
        items.param_type = Some(mapped_item.clone());

        // One more level: array-of-array and array-of-object are the deepest
        // shapes observed in canonical definitions.
        if mapped_item == "array" {
            if let Some(inner) = items.items.as_mut() {
                let inner_type = match inner.param_type.as_deref() {
                    Some(t) => mapper.map(t),
                    None => mapper.fallback(),
                };
                inner.param_type = Some(inner_type.to_string());
            }
        } else if mapped_item == "object" {
            if let Some(inner) = items.properties.as_mut() {
                cast_properties(inner, mapper);
            }
        }
    }
}
