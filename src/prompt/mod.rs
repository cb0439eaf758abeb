//! System-prompt construction for the tag-grammar convention.
//!
//! Renders a normalized tool list into the textual system prompt the legacy
//! tag-based prompting convention expects. The whitespace and newline layout
//! here is part of the wire format — downstream prompt compatibility depends
//! on it byte for byte, so the template strings below are not reflowed.
//!
//! Input is Schema Normalizer output (flat tool documents, e.g. the
//! `AnthropicPrompt` style), not canonical [`ToolSpec`]s.
//!
//! [`ToolSpec`]: crate::types::ToolSpec

use serde_json::Value as JsonValue;

use crate::utils::pyliteral::{py_repr, py_str};

const PROMPT_HEADER: &str = "In this environment you have access to a set of tools you can use to answer the user's question.\n\
\n\
You may call them like this:\n\
<function_calls>\n\
<invoke>\n\
<tool_name>$TOOL_NAME</tool_name>\n\
<parameters>\n\
<$PARAMETER_NAME>$PARAMETER_VALUE</$PARAMETER_NAME>\n\
...\n\
</parameters>\n\
</invoke>\n\
</function_calls>\n\
\n\
Here are the tools available:\n\
<tools>\n";

/// Render the full tool-use system prompt.
pub fn tool_use_system_prompt(tools: &[JsonValue]) -> String {
    let blocks: Vec<String> = tools.iter().map(format_tool_prompt).collect();
    format!("{}{}\n</tools>", PROMPT_HEADER, blocks.join("\n"))
}

/// Render one `<tool_description>` block.
pub fn format_tool_prompt(tool: &JsonValue) -> String {
    let name = tool.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let description = tool
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let empty = JsonValue::Null;
    let properties = tool
        .pointer("/parameters/properties")
        .unwrap_or(&empty);
    format!(
        "<tool_description>\n\
         <tool_name>{}</tool_name>\n\
         <description>\n\
         {}\n\
         </description>\n\
         <parameters>\n\
         {}\n\
         </parameters>\n\
         </tool_description>",
        name,
        description,
        format_parameters_prompt(properties)
    )
}

/// Render the `<parameter>` entries for a tool's properties.
///
/// A property literally named `required` is skipped (some legacy datasets
/// stuff the required list into the property map). The `<description>` line
/// is only emitted when the parameter carries a description of its own, even
/// though default/items/properties notes are computed regardless.
pub fn format_parameters_prompt(properties: &JsonValue) -> String {
    let Some(map) = properties.as_object() else {
        return String::new();
    };

    let mut out = String::new();
    for (name, parameter) in map {
        if name == "required" {
            continue;
        }
        let has_description = parameter.get("description").is_some();
        let mut description = parameter
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        if let Some(default) = parameter.get("default") {
            description.push_str(&format!("\nDefault value: {}", py_str(default)));
        } else if let Some(items) = parameter.get("items") {
            description.push_str(&format!("\n List element type: {}", py_repr(items)));
        } else if let Some(nested) = parameter.get("properties") {
            description.push_str(&format!("\n Dictionaries properties: {}", py_repr(nested)));
        }
        let type_name = parameter.get("type").and_then(|v| v.as_str()).unwrap_or("");
        if has_description {
            out.push_str(&format!(
                "<parameter>\n<name>{}</name>\n<type>{}</type>\n<description>{}</description>\n</parameter>\n",
                name, type_name, description
            ));
        } else {
            out.push_str(&format!(
                "<parameter>\n<name>{}</name>\n<type>{}</type>\n</parameter>\n",
                name, type_name
            ));
        }
    }
    out.pop();
    out
}
