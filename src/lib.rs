//! # toolcall-bridge
//!
//! 这是工具调用适配层：在中立的工具定义与各厂商的 schema / 调用文本约定之间双向转换。
//!
//! Bidirectional adapter between a single, vendor-neutral description of
//! tools (callable functions with JSON-schema-like parameter definitions) and
//! the heterogeneous textual conventions that model providers and target
//! execution languages require.
//!
//! ## Overview
//!
//! Forward direction: turn a neutral tool list into a provider-specific
//! schema document, optionally rewriting parameter type vocabularies and
//! prompt text. Backward direction: take a model's free-form textual answer —
//! Python-syntax call lists, an XML-like tag grammar, or a foreign-language
//! call syntax — and recover a canonical, structured list of call records
//! suitable for equality comparison against ground truth or for execution.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Canonical tool definitions and call records |
//! | [`schema`] | Type vocabulary mapping and provider-style rendering |
//! | [`parser`] | Call-expression parsing (native grammar + foreign delegates) |
//! | [`extract`] | Tag-grammar invocation extraction |
//! | [`prompt`] | Tag-grammar system-prompt construction |
//! | [`preprocess`] | Language-specific tool pre-processing |
//! | [`coerce`] | Best-effort typed coercion of raw parameter text |
//! | [`execution`] | Executable call-string rendering |
//!
//! ## Quick Start
//!
//! ```rust
//! use toolcall_bridge::schema::{normalize, ProviderStyle, TypeMapper};
//! use toolcall_bridge::parser::parse_python_call_list;
//! use toolcall_bridge::types::ToolSpec;
//!
//! // Forward: canonical tools -> provider document
//! let tool: ToolSpec = serde_json::from_value(serde_json::json!({
//!     "name": "math.hypotenuse",
//!     "description": "Length of the hypotenuse.",
//!     "parameters": {
//!         "type": "object",
//!         "properties": {
//!             "a": {"type": "float", "description": "First leg."},
//!             "b": {"type": "float", "description": "Second leg."}
//!         },
//!         "required": ["a", "b"]
//!     }
//! })).unwrap();
//! let docs = normalize(&[tool], &TypeMapper::json_schema(), ProviderStyle::OpenAi);
//! assert_eq!(docs[0]["function"]["name"], "math_hypotenuse");
//!
//! // Backward: completion text -> call records
//! let calls = parse_python_call_list("[math.hypotenuse(a=3, b=4)]").unwrap();
//! assert_eq!(calls[0].function_name, "math.hypotenuse");
//! ```
//!
//! All operations are synchronous, pure functions over immutable inputs with
//! no shared state; every call is independently safe to invoke concurrently.

pub mod coerce;
pub mod execution;
pub mod extract;
pub mod parser;
pub mod preprocess;
pub mod prompt;
pub mod schema;
pub mod types;

pub(crate) mod utils;

// Re-export main types for convenience
pub use extract::{extract, ExtractionOutcome, Invocation, MalformedReason};
pub use parser::{
    parse_call_list, parse_python_call_list, ForeignCallParser, ForeignParserRegistry,
    ParseError, TargetLanguage,
};
pub use schema::{normalize, ProviderStyle, TypeMapper};
pub use types::{CallRecord, ParamSchema, ParamSpec, ToolSpec, Value};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
