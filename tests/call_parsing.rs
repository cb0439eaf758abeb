//! End-to-end call parsing, coercion, and execution-string rendering

use toolcall_bridge::coerce::coerce;
use toolcall_bridge::execution::{render_call_record, to_execution_strings};
use toolcall_bridge::{
    parse_call_list, parse_python_call_list, CallRecord, ForeignCallParser,
    ForeignParserRegistry, ParseError, TargetLanguage, Value,
};

#[test]
fn test_single_call_with_mixed_argument_shapes() {
    let records = parse_python_call_list(
        "[foo(a=1, b=[1,2,3], c={'x': 'y'})]",
    )
    .unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.function_name, "foo");
    assert_eq!(record.arguments["a"], Value::Int(1));
    assert_eq!(
        record.arguments["b"],
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(
        record.arguments["c"],
        Value::Dict(vec![(Value::Str("x".into()), Value::Str("y".into()))])
    );
}

#[test]
fn test_dotted_namespace_and_negative_number() {
    let records = parse_python_call_list("[ns.sub.func(x=-5)]").unwrap();
    assert_eq!(records[0].function_name, "ns.sub.func");
    assert_eq!(records[0].arguments["x"], Value::Int(-5));
}

#[test]
fn test_realistic_multi_call_completion() {
    let text = "[get_weather(city='Boston', days=3), unit_convert(value=2.5, from_unit='mi', to_unit='km'), timezone.lookup(name='US/Eastern')]";
    let records = parse_python_call_list(text).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].arguments["city"], Value::Str("Boston".into()));
    assert_eq!(records[1].arguments["value"], Value::Float(2.5));
    assert_eq!(records[2].function_name, "timezone.lookup");
}

#[test]
fn test_nested_keyword_call_becomes_record() {
    let records =
        parse_python_call_list("[schedule(task=remind(message='standup', minutes=10))]").unwrap();
    let Value::Call(nested) = &records[0].arguments["task"] else {
        panic!("expected nested call record");
    };
    assert_eq!(nested.function_name, "remind");
    assert_eq!(nested.arguments["minutes"], Value::Int(10));
}

#[test]
fn test_nested_positional_call_stays_opaque_text() {
    let records = parse_python_call_list("[compute(value=max(3, 7))]").unwrap();
    assert_eq!(records[0].arguments["value"], Value::Str("max(3, 7)".into()));
}

#[test]
fn test_parse_errors_are_surfaced_not_masked() {
    // Plain prose
    assert!(parse_python_call_list("I cannot answer that.").is_err());
    // A list that is not all calls
    assert_eq!(
        parse_python_call_list("['just', 'strings']"),
        Err(ParseError::TopLevelNotCall { index: 0 })
    );
    // A dict at top level
    assert_eq!(
        parse_python_call_list("{'f': 1}"),
        Err(ParseError::NotACallList)
    );
    // Truncated output
    assert!(parse_python_call_list("[foo(a=1, b=").is_err());
}

#[test]
fn test_ellipsis_and_identifier_arguments() {
    let records = parse_python_call_list("[f(placeholder=..., mode=fast)]").unwrap();
    assert_eq!(records[0].arguments["placeholder"], Value::Str("...".into()));
    assert_eq!(records[0].arguments["mode"], Value::Str("fast".into()));
}

#[test]
fn test_arithmetic_argument_evaluates_to_literal() {
    let records = parse_python_call_list("[pay(amount=3 * 7 + 1, rate=1 / 4)]").unwrap();
    assert_eq!(records[0].arguments["amount"], Value::Int(22));
    assert_eq!(records[0].arguments["rate"], Value::Float(0.25));
}

#[test]
fn test_foreign_language_delegation() {
    struct FixedParser;
    impl ForeignCallParser for FixedParser {
        fn parse(&self, call_list: &str) -> Result<Vec<CallRecord>, ParseError> {
            // The adapter must hand us the text without its enclosing
            // brackets.
            assert!(!call_list.starts_with('['));
            Ok(vec![CallRecord::new("ok").with_arg("raw", call_list)])
        }
    }

    let mut registry = ForeignParserRegistry::new();
    registry.register(TargetLanguage::Java, Box::new(FixedParser));

    let records = parse_call_list(
        "[Collections.sort(list)]",
        TargetLanguage::Java,
        &registry,
    )
    .unwrap();
    assert_eq!(records[0].function_name, "ok");
    assert_eq!(
        records[0].arguments["raw"],
        Value::Str("Collections.sort(list)".into())
    );
}

#[test]
fn test_coercion_recovers_types_after_extraction() {
    // Raw tag-extracted text plus the declared type from the schema.
    assert_eq!(coerce("37", "integer"), Value::Int(37));
    assert_eq!(coerce("[1, 2]", "list"), Value::List(vec![Value::Int(1), Value::Int(2)]));
    assert_eq!(coerce("oops[", "dict"), Value::Str("oops[".into()));
}

#[test]
fn test_coercion_idempotence_for_primitives() {
    let first = coerce("42", "int");
    let Value::Int(n) = first else { panic!() };
    assert_eq!(coerce(&n.to_string(), "int"), Value::Int(42));

    let first = coerce("2.75", "float");
    let Value::Float(f) = first else { panic!() };
    assert_eq!(coerce(&f.to_string(), "float"), Value::Float(2.75));
}

#[test]
fn test_execution_string_rendering() {
    let calls = vec![
        (
            "calculate_triangle_area".to_string(),
            r#"{"base": 10, "height": 5, "unit": "cm"}"#.to_string(),
        ),
        ("noop".to_string(), "{}".to_string()),
    ];
    let rendered = to_execution_strings(&calls).unwrap();
    assert_eq!(
        rendered,
        vec![
            "calculate_triangle_area(base=10,height=5,unit='cm')",
            "noop()",
        ]
    );
}

#[test]
fn test_parsed_record_round_trips_to_execution_string() {
    let records = parse_python_call_list("[ns.sub.func(x=-5, tag='a')]").unwrap();
    assert_eq!(render_call_record(&records[0]), "ns.sub.func(x=-5,tag='a')");
}
