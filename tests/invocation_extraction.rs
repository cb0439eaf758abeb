//! Tag-grammar round trip: prompt construction, extraction, coercion

use serde_json::json;
use toolcall_bridge::coerce::coerce;
use toolcall_bridge::prompt::tool_use_system_prompt;
use toolcall_bridge::schema::{normalize, ProviderStyle, TypeMapper};
use toolcall_bridge::{extract, ExtractionOutcome, MalformedReason, ToolSpec, Value};

fn tools() -> Vec<ToolSpec> {
    serde_json::from_value(json!([{
        "name": "get_stock_price",
        "description": "Current price for a ticker symbol.",
        "parameters": {
            "type": "object",
            "properties": {
                "symbol": {"type": "string", "description": "Ticker symbol."},
                "quantity": {"type": "integer", "description": "Share count."}
            },
            "required": ["symbol"]
        }
    }]))
    .unwrap()
}

#[test]
fn test_prompt_embeds_rendered_tools() {
    let docs = normalize(
        &tools(),
        &TypeMapper::json_schema(),
        ProviderStyle::AnthropicPrompt,
    );
    let prompt = tool_use_system_prompt(&docs);
    assert!(prompt.starts_with("In this environment you have access to a set of tools"));
    assert!(prompt.contains("<tool_name>get_stock_price</tool_name>"));
    assert!(prompt.contains("<name>symbol</name>\n<type>string</type>"));
    assert!(prompt.ends_with("</tools>"));
}

#[test]
fn test_extraction_of_a_well_formed_completion() {
    let completion = "I'll check the price for you.\n\n\
        <function_calls>\n\
        <invoke>\n\
        <tool_name>get_stock_price</tool_name>\n\
        <parameters>\n\
        <symbol>ACME</symbol>\n\
        <quantity>10</quantity>\n\
        </parameters>\n\
        </invoke>\n\
        </function_calls>";
    let ExtractionOutcome::Success {
        invocations,
        prefix,
    } = extract(completion)
    else {
        panic!("expected success");
    };
    assert_eq!(prefix, "I'll check the price for you.\n\n");
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].tool_name, "get_stock_price");
    assert_eq!(
        invocations[0].parameters,
        vec![
            ("symbol".to_string(), "ACME".to_string()),
            ("quantity".to_string(), "10".to_string()),
        ]
    );
}

#[test]
fn test_extracted_raw_values_coerce_via_schema_lookup() {
    let completion = "<function_calls><invoke><tool_name>get_stock_price</tool_name>\
        <parameters><symbol>ACME</symbol><quantity>10</quantity></parameters>\
        </invoke></function_calls>";
    let ExtractionOutcome::Success { invocations, .. } = extract(completion) else {
        panic!("expected success");
    };

    let schema = &tools()[0].parameters;
    let mut typed = Vec::new();
    for (name, raw) in &invocations[0].parameters {
        let declared = schema.properties[name].param_type.as_deref().unwrap();
        typed.push((name.clone(), coerce(raw, declared)));
    }
    assert_eq!(typed[0].1, Value::Str("ACME".into()));
    assert_eq!(typed[1].1, Value::Int(10));
}

#[test]
fn test_completion_without_grammar_is_zero_invocations() {
    let ExtractionOutcome::Success {
        invocations,
        prefix,
    } = extract("The current price of ACME is $13.37.")
    else {
        panic!("expected success");
    };
    assert!(invocations.is_empty());
    assert!(prefix.is_empty());
}

#[test]
fn test_three_malformed_inputs_yield_three_distinct_reasons() {
    let missing_pair = "<invoke><tool_name>t</tool_name></invoke>";
    let unbalanced = "<function_calls><invoke><tool_name>t</tool_name>\
        <parameters><a>1</parameters></invoke></function_calls>";
    let multiple_names = "<function_calls><invoke>\
        <tool_name>a</tool_name><tool_name>b</tool_name>\
        <parameters></parameters></invoke></function_calls>";

    let reasons: Vec<MalformedReason> = [missing_pair, unbalanced, multiple_names]
        .iter()
        .map(|text| match extract(text) {
            ExtractionOutcome::Failure { reason } => reason,
            other => panic!("expected failure, got {:?}", other),
        })
        .collect();

    assert_eq!(reasons[0], MalformedReason::MissingFunctionCallsBlock);
    assert_eq!(reasons[1], MalformedReason::UnbalancedParameterTags);
    assert_eq!(reasons[2], MalformedReason::MultipleToolNames);

    // The rendered reason strings must stay distinguishable for scoring.
    let rendered: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
    assert_ne!(rendered[0], rendered[1]);
    assert_ne!(rendered[0], rendered[2]);
    assert_ne!(rendered[1], rendered[2]);
}

#[test]
fn test_multiple_invocations_keep_document_order() {
    let completion = "<function_calls>\
        <invoke><tool_name>get_stock_price</tool_name>\
        <parameters><symbol>ACME</symbol></parameters></invoke>\
        <invoke><tool_name>get_stock_price</tool_name>\
        <parameters><symbol>GLOBEX</symbol></parameters></invoke>\
        </function_calls>";
    let ExtractionOutcome::Success { invocations, .. } = extract(completion) else {
        panic!("expected success");
    };
    assert_eq!(invocations.len(), 2);
    assert_eq!(invocations[0].parameters[0].1, "ACME");
    assert_eq!(invocations[1].parameters[0].1, "GLOBEX");
}
