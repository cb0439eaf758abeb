//! Canonical call records recovered from model output.
//!
//! A [`CallRecord`] is the structured form of one function invocation parsed
//! out of free text, and [`Value`] is the language-neutral argument value it
//! carries. Both are plain immutable data, suitable for equality comparison
//! against ground truth or for rendering into an executable call string.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// One parsed function invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallRecord {
    /// Dotted path as written (`ns.sub.func`), or underscore-joined when the
    /// producing convention disallows dots.
    pub function_name: String,
    /// Keyword arguments in source order. Duplicate keywords overwrite the
    /// earlier value in place (last writer wins, first position kept).
    pub arguments: IndexMap<String, Value>,
}

impl CallRecord {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }
}

/// Language-neutral argument value.
///
/// Dict keys may be any `Value` (the source grammar allows it); insertion
/// order is preserved. Opaque-source-text fallbacks are plain `Str` values
/// holding the reconstructed source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Dict(Vec<(Value, Value)>),
    /// A nested keyword-argument call, e.g. `f(x=g(y=1))`.
    Call(CallRecord),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Convert to JSON for interop with provider documents.
    ///
    /// Lossy where JSON has no counterpart: tuples become arrays, non-string
    /// dict keys are stringified, and a nested call becomes a single-key
    /// object mapping the callee name to its argument object.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(n) => JsonValue::from(*n),
            Value::Float(f) => JsonValue::from(*f),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::List(items) | Value::Tuple(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Dict(entries) => {
                let mut map = serde_json::Map::new();
                for (k, v) in entries {
                    let key = match k {
                        Value::Str(s) => s.clone(),
                        other => other.to_source_string(),
                    };
                    map.insert(key, v.to_json());
                }
                JsonValue::Object(map)
            }
            Value::Call(record) => {
                let mut args = serde_json::Map::new();
                for (name, v) in &record.arguments {
                    args.insert(name.clone(), v.to_json());
                }
                let mut map = serde_json::Map::new();
                map.insert(record.function_name.clone(), JsonValue::Object(args));
                JsonValue::Object(map)
            }
        }
    }

    /// Render the value back as source-style literal text.
    pub fn to_source_string(&self) -> String {
        match self {
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Str(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Value::List(items) => format!("[{}]", join_source(items)),
            Value::Tuple(items) => format!("({})", join_source(items)),
            Value::Dict(entries) => {
                let body = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.to_source_string(), v.to_source_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", body)
            }
            Value::Call(record) => {
                let args = record
                    .arguments
                    .iter()
                    .map(|(name, v)| format!("{}={}", name, v.to_source_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", record.function_name, args)
            }
        }
    }
}

fn join_source(items: &[Value]) -> String {
    items
        .iter()
        .map(Value::to_source_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
