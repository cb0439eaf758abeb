use thiserror::Error;

use crate::parser::ParseError;

/// Unified error type for the adapter.
///
/// Deliberately small: schema normalization and coercion are total functions
/// that never error, and malformed tag-grammar output is a first-class
/// [`ExtractionOutcome::Failure`] value rather than an error. What remains is
/// call parsing and JSON decoding.
///
/// [`ExtractionOutcome::Failure`]: crate::extract::ExtractionOutcome
#[derive(Debug, Error)]
pub enum Error {
    #[error("call parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
