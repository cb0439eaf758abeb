//! 调用表达式解析：把模型输出的调用列表文本还原为结构化调用记录。
//!
//! Call-expression parsing. Turns a model completion that is syntactically a
//! bracketed list of call expressions into an ordered list of
//! [`CallRecord`]s.
//!
//! The native grammar (Python call syntax) is parsed in-process by a
//! hand-written lexer and recursive-descent parser over a closed expression
//! tree. Other target execution languages are handled by external
//! collaborators registered in a [`ForeignParserRegistry`] — the registry is
//! handed the call-list text with its enclosing brackets stripped and its
//! returned records are trusted verbatim, mirroring how provider drivers are
//! selected at runtime elsewhere in this ecosystem.
//!
//! A malformed completion is an expected outcome, not a programming error:
//! [`ParseError`] is surfaced to the caller, who records it as a scoring
//! category rather than crashing.

mod expr;
mod lexer;
mod resolve;

use std::collections::HashMap;
use std::fmt;

use crate::types::{CallRecord, Value};

/// Target execution language of the calls being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    Python,
    Java,
    JavaScript,
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetLanguage::Python => "Python",
            TargetLanguage::Java => "Java",
            TargetLanguage::JavaScript => "JavaScript",
        };
        f.write_str(name)
    }
}

/// Errors raised while parsing a call-expression list.
///
/// These propagate uncaught: a completion that fails to parse is a legitimate,
/// scoreable outcome that must be surfaced, never masked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("expected a bracketed list of call expressions")]
    NotACallList,

    #[error("top-level element {index} is not a call expression")]
    TopLevelNotCall { index: usize },

    #[error("unsupported expression: {kind} at byte {position}")]
    UnsupportedExpression { kind: &'static str, position: usize },

    #[error("no call parser registered for {language}")]
    UnsupportedLanguage { language: TargetLanguage },
}

/// External per-language call parser.
///
/// One implementation per non-native target language. Receives the call-list
/// text with the enclosing brackets already stripped and must return an error
/// on malformed input rather than silently dropping calls.
pub trait ForeignCallParser: Send + Sync {
    fn parse(&self, call_list: &str) -> Result<Vec<CallRecord>, ParseError>;
}

/// Registry of foreign-language parser collaborators.
#[derive(Default)]
pub struct ForeignParserRegistry {
    parsers: HashMap<TargetLanguage, Box<dyn ForeignCallParser>>,
}

impl ForeignParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        language: TargetLanguage,
        parser: Box<dyn ForeignCallParser>,
    ) -> &mut Self {
        self.parsers.insert(language, parser);
        self
    }

    pub fn get(&self, language: TargetLanguage) -> Option<&dyn ForeignCallParser> {
        self.parsers.get(&language).map(|p| p.as_ref())
    }
}

/// Parse a call-expression list for the given target language.
///
/// Python is parsed natively; other languages delegate to the registry.
pub fn parse_call_list(
    text: &str,
    language: TargetLanguage,
    registry: &ForeignParserRegistry,
) -> Result<Vec<CallRecord>, ParseError> {
    match language {
        TargetLanguage::Python => parse_python_call_list(text),
        other => {
            let parser = registry
                .get(other)
                .ok_or(ParseError::UnsupportedLanguage { language: other })?;
            parser.parse(strip_enclosing_brackets(text))
        }
    }
}

/// Parse a Python-syntax call list, e.g. `[foo(a=1), ns.bar(x='y')]`.
///
/// The top level must be a list literal and every element must be a call
/// expression; any other top-level form is a hard error, never skipped.
pub fn parse_python_call_list(text: &str) -> Result<Vec<CallRecord>, ParseError> {
    let parsed = expr::parse_expression(text)?;
    let elements = match &parsed.kind {
        expr::ExprKind::List(items) => items,
        _ => return Err(ParseError::NotACallList),
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        if !matches!(element.kind, expr::ExprKind::Call { .. }) {
            return Err(ParseError::TopLevelNotCall { index });
        }
        records.push(resolve::resolve_call(element, text)?);
    }
    Ok(records)
}

/// Parse a single Python literal (`ast.literal_eval` discipline: constants,
/// containers, and negated numbers only).
pub(crate) fn parse_python_literal(text: &str) -> Result<Value, ParseError> {
    let parsed = expr::parse_expression(text)?;
    resolve::resolve_literal(&parsed)
}

// The original convention passes `input_str[1:-1]`: exactly one leading and
// one trailing character, whatever they are.
fn strip_enclosing_brackets(text: &str) -> &str {
    let mut chars = text.char_indices();
    let Some((_, first)) = chars.next() else {
        return text;
    };
    let start = first.len_utf8();
    match text[start..].char_indices().next_back() {
        Some((offset, _)) => &text[start..start + offset],
        None => &text[start..start],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_call_with_containers() {
        let records = parse_python_call_list("[foo(a=1, b=[1,2,3], c={'x': 'y'})]").unwrap();
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
    fn test_parse_dotted_name_with_negative_argument() {
        let records = parse_python_call_list("[ns.sub.func(x=-5)]").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].function_name, "ns.sub.func");
        assert_eq!(records[0].arguments["x"], Value::Int(-5));
    }

    #[test]
    fn test_parse_multiple_calls_keep_order() {
        let records =
            parse_python_call_list("[first(a=1), second(b=2), third(c=3)]").unwrap();
        let names: Vec<_> = records.iter().map(|r| r.function_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_rejects_non_list_top_level() {
        assert_eq!(
            parse_python_call_list("foo(a=1)"),
            Err(ParseError::NotACallList)
        );
        assert_eq!(
            parse_python_call_list("{'a': 1}"),
            Err(ParseError::NotACallList)
        );
    }

    #[test]
    fn test_parse_rejects_non_call_element() {
        assert_eq!(
            parse_python_call_list("[foo(a=1), 42]"),
            Err(ParseError::TopLevelNotCall { index: 1 })
        );
    }

    #[test]
    fn test_parse_positional_arguments_are_not_recorded() {
        let records = parse_python_call_list("[foo(1, 2, a=3)]").unwrap();
        assert_eq!(records[0].arguments.len(), 1);
        assert_eq!(records[0].arguments["a"], Value::Int(3));
    }

    #[test]
    fn test_parse_duplicate_keyword_last_wins() {
        let records = parse_python_call_list("[foo(a=1, a=2)]").unwrap();
        assert_eq!(records[0].arguments.len(), 1);
        assert_eq!(records[0].arguments["a"], Value::Int(2));
    }

    #[test]
    fn test_foreign_language_requires_registration() {
        let registry = ForeignParserRegistry::new();
        assert_eq!(
            parse_call_list("[f(a=1)]", TargetLanguage::Java, &registry),
            Err(ParseError::UnsupportedLanguage {
                language: TargetLanguage::Java
            })
        );
    }

    #[test]
    fn test_foreign_parser_receives_bracket_stripped_text() {
        struct Capture;
        impl ForeignCallParser for Capture {
            fn parse(&self, call_list: &str) -> Result<Vec<CallRecord>, ParseError> {
                assert_eq!(call_list, "f(a=1)");
                Ok(vec![CallRecord::new("f")])
            }
        }
        let mut registry = ForeignParserRegistry::new();
        registry.register(TargetLanguage::JavaScript, Box::new(Capture));
        let records =
            parse_call_list("[f(a=1)]", TargetLanguage::JavaScript, &registry).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_strip_enclosing_brackets_is_one_char_each_side() {
        assert_eq!(strip_enclosing_brackets("[abc]"), "abc");
        assert_eq!(strip_enclosing_brackets("(x)"), "x");
        assert_eq!(strip_enclosing_brackets("ab"), "");
        assert_eq!(strip_enclosing_brackets(""), "");
    }
}
