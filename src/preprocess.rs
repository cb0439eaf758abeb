//! Language-specific pre-processing of tool definitions.
//!
//! When the target execution language is not the native one, the eventual
//! call will be rendered as a string literal rather than typed arguments.
//! Every parameter's declared type therefore becomes `"string"`, with a
//! human-readable note describing the original type appended to the
//! description; nested `items`/`properties` are removed once their
//! information has been folded into text. The native language is a no-op
//! here — it only gets a syntax note appended to the user-facing prompt.
//!
//! Applied before schema normalization for the provider styles that need it.

use crate::parser::TargetLanguage;
use crate::types::ToolSpec;

/// Rewrite parameter types to strings for a non-native target language.
///
/// Returns new values; the canonical input is left untouched.
pub fn stringify_for_language(tools: &[ToolSpec], language: TargetLanguage) -> Vec<ToolSpec> {
    match language {
        TargetLanguage::Python => tools.to_vec(),
        TargetLanguage::Java => tools.iter().map(stringify_java).collect(),
        TargetLanguage::JavaScript => tools.iter().map(stringify_javascript).collect(),
    }
}

fn stringify_java(tool: &ToolSpec) -> ToolSpec {
    let mut tool = tool.clone();
    for spec in tool.parameters.properties.values_mut() {
        match spec.param_type.as_deref() {
            Some("any") => spec.push_description_note(
                " This parameter can be of any type of Java object in string representation.",
            ),
            Some(declared) => {
                let note = format!(
                    " This is Java {} type parameter in string representation.",
                    declared
                );
                spec.push_description_note(&note);
            }
            None => {}
        }
        if matches!(spec.param_type.as_deref(), Some("ArrayList") | Some("Array")) {
            let element_type = spec
                .items
                .as_ref()
                .and_then(|items| items.param_type.clone())
                .unwrap_or_else(|| "string".to_string());
            spec.push_description_note(&format!(
                " The list elements are of type {}; they are not in string representation.",
                element_type
            ));
            spec.items = None;
        }
        spec.param_type = Some("string".to_string());
    }
    tool
}

fn stringify_javascript(tool: &ToolSpec) -> ToolSpec {
    let mut tool = tool.clone();
    for spec in tool.parameters.properties.values_mut() {
        match spec.param_type.as_deref() {
            Some("any") => spec.push_description_note(
                " This parameter can be of any type of JavaScript object in string representation.",
            ),
            Some(declared) => {
                let note = format!(
                    " This is JavaScript {} type parameter in string representation.",
                    declared
                );
                spec.push_description_note(&note);
            }
            None => {}
        }
        if spec.param_type.as_deref() == Some("array") {
            let element_type = spec
                .items
                .as_ref()
                .and_then(|items| items.param_type.clone())
                .unwrap_or_else(|| "string".to_string());
            spec.push_description_note(&format!(
                " The list elements are of type {}; they are not in string representation.",
                element_type
            ));
            spec.items = None;
        }
        if spec.param_type.as_deref() == Some("dict") {
            // Not every dict declares nested properties.
            if let Some(properties) = spec.properties.take() {
                let schema = serde_json::to_string(&properties).unwrap_or_default();
                spec.push_description_note(&format!(
                    " The dictionary entries have the following schema; they are not in string representation. {}",
                    schema
                ));
            }
        }
        spec.param_type = Some("string".to_string());
    }
    tool
}

/// Append the call-syntax note for the target language to a prompt.
pub fn note_for_language(prompt: &str, language: TargetLanguage) -> String {
    let note = match language {
        TargetLanguage::Java => " Note that the provided function is in Java 8 SDK syntax.",
        TargetLanguage::JavaScript => " Note that the provided function is in JavaScript syntax.",
        TargetLanguage::Python => " Note that the provided function is in Python 3 syntax.",
    };
    format!("{}\n{}", prompt, note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn java_tool() -> ToolSpec {
        serde_json::from_value(json!({
            "name": "CollectionUtils.sort",
            "description": "Sort a list.",
            "parameters": {
                "type": "object",
                "properties": {
                    "data": {
                        "type": "ArrayList",
                        "description": "Input list.",
                        "items": {"type": "long"}
                    },
                    "comparator": {"type": "any", "description": "Comparator."}
                },
                "required": ["data"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_java_types_become_strings_with_notes() {
        let tools = vec![java_tool()];
        let processed = stringify_for_language(&tools, TargetLanguage::Java);
        let data = &processed[0].parameters.properties["data"];
        assert_eq!(data.param_type.as_deref(), Some("string"));
        assert_eq!(
            data.description.as_deref(),
            Some(
                "Input list. This is Java ArrayList type parameter in string representation. \
                 The list elements are of type long; they are not in string representation."
            )
        );
        assert!(data.items.is_none());

        let comparator = &processed[0].parameters.properties["comparator"];
        assert_eq!(
            comparator.description.as_deref(),
            Some(
                "Comparator. This parameter can be of any type of Java object in string representation."
            )
        );

        // Canonical input untouched.
        assert_eq!(
            tools[0].parameters.properties["data"].param_type.as_deref(),
            Some("ArrayList")
        );
        assert!(tools[0].parameters.properties["data"].items.is_some());
    }

    #[test]
    fn test_javascript_dict_schema_folded() {
        let tool: ToolSpec = serde_json::from_value(json!({
            "name": "t",
            "description": "d",
            "parameters": {
                "type": "object",
                "properties": {
                    "config": {
                        "type": "dict",
                        "description": "Config.",
                        "properties": {"depth": {"type": "number"}}
                    }
                }
            }
        }))
        .unwrap();
        let processed = stringify_for_language(&[tool], TargetLanguage::JavaScript);
        let config = &processed[0].parameters.properties["config"];
        assert_eq!(config.param_type.as_deref(), Some("string"));
        assert!(config.properties.is_none());
        let description = config.description.as_deref().unwrap();
        assert!(description.starts_with(
            "Config. This is JavaScript dict type parameter in string representation. \
             The dictionary entries have the following schema; they are not in string representation. "
        ));
        assert!(description.contains(r#"{"depth":{"type":"number"}}"#));
    }

    #[test]
    fn test_python_is_a_no_op() {
        let tools = vec![java_tool()];
        let processed = stringify_for_language(&tools, TargetLanguage::Python);
        assert_eq!(processed, tools);
    }

    #[test]
    fn test_note_for_language() {
        assert_eq!(
            note_for_language("Do the thing.", TargetLanguage::Java),
            "Do the thing.\n Note that the provided function is in Java 8 SDK syntax."
        );
        assert!(note_for_language("p", TargetLanguage::Python).ends_with("Python 3 syntax."));
    }
}
