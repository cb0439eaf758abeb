//! Tagged invocation extraction.
//!
//! Validates and decodes the nested tag grammar some providers use instead of
//! a structured tool-call API:
//!
//! ```text
//! <function_calls>
//! <invoke>
//! <tool_name>NAME</tool_name>
//! <parameters>
//! <PARAM>VALUE</PARAM>
//! </parameters>
//! </invoke>
//! </function_calls>
//! ```
//!
//! A completion that never attempts the grammar is a trivial success with
//! zero invocations. A completion that attempts it and gets the structure
//! wrong is a [`MalformedReason`] — returned, not thrown, because "the model
//! didn't format its call correctly" is an expected, scoreable outcome.
//! Each structural rule has its own reason so upstream scoring can classify
//! failures by cause; the variants must stay distinguishable.
//!
//! Parameter values are raw text at this stage. Type coercion happens later,
//! in [`crate::coerce`], once the caller has looked up the declared type from
//! the original tool definition.

use once_cell::sync::Lazy;
use regex::Regex;

/// One decoded `<invoke>` unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool_name: String,
    /// `(parameter_name, raw_text)` pairs in document order.
    pub parameters: Vec<(String, String)>,
}

/// Result of scanning a completion for tagged invocations.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Success {
        invocations: Vec<Invocation>,
        /// Free text preceding the first `<function_calls>` block.
        prefix: String,
    },
    Failure {
        reason: MalformedReason,
    },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }

    pub fn invocations(&self) -> &[Invocation] {
        match self {
            ExtractionOutcome::Success { invocations, .. } => invocations,
            ExtractionOutcome::Failure { .. } => &[],
        }
    }
}

/// Structural rule violations, one variant per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("no valid <function_calls></function_calls> tags present")]
    MissingFunctionCallsBlock,

    #[error("missing <invoke></invoke> tags inside of <function_calls></function_calls> tags")]
    MissingInvoke,

    #[error("missing <tool_name></tool_name> tags inside of <invoke></invoke> tags")]
    MissingToolName,

    #[error("more than one tool_name specified inside single set of <invoke></invoke> tags")]
    MultipleToolNames,

    #[error("missing <parameters></parameters> tags inside of <invoke></invoke> tags")]
    MissingParameters,

    #[error(
        "more than one set of <parameters></parameters> tags specified inside single set of <invoke></invoke> tags"
    )]
    MultipleParameters,

    #[error("imbalanced tags inside <parameters></parameters> tags")]
    UnbalancedParameterTags,

    #[error("non-matching opening and closing tags inside <parameters></parameters> tags")]
    MismatchedParameterTags,
}

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "<function_calls>|</function_calls>|<invoke>|</invoke>|<tool_name>|</tool_name>|<parameters>|</parameters>",
    )
    .unwrap()
});
static BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<function_calls>(.*)</function_calls>").unwrap());
static INVOKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<invoke>.*?</invoke>").unwrap());
static TOOL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<tool_name>.*?</tool_name>").unwrap());
static PARAMETERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<parameters>.*?</parameters>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<.*?>").unwrap());

/// Scan a completion for tagged invocations.
///
/// Only the first `<function_calls>` block is considered; any later blocks
/// are ignored regardless of their correctness.
pub fn extract(text: &str) -> ExtractionOutcome {
    // No marker tags at all: no call was attempted, which is not an error.
    if !MARKER_RE.is_match(text) {
        return ExtractionOutcome::Success {
            invocations: Vec::new(),
            prefix: String::new(),
        };
    }

    let Some(block) = BLOCK_RE.captures(text) else {
        return failure(MalformedReason::MissingFunctionCallsBlock);
    };
    let body = block.get(1).map(|m| m.as_str()).unwrap_or("");
    let prefix = text[..block.get(0).map(|m| m.start()).unwrap_or(0)].to_string();

    if !INVOKE_RE.is_match(body) {
        return failure(MalformedReason::MissingInvoke);
    }

    let mut invocations = Vec::new();
    for invoke in INVOKE_RE.find_iter(body) {
        match decode_invoke(invoke.as_str()) {
            Ok(invocation) => invocations.push(invocation),
            Err(reason) => return failure(reason),
        }
    }

    ExtractionOutcome::Success {
        invocations,
        prefix,
    }
}

fn failure(reason: MalformedReason) -> ExtractionOutcome {
    tracing::debug!(%reason, "malformed tagged invocation");
    ExtractionOutcome::Failure { reason }
}

fn decode_invoke(invoke: &str) -> Result<Invocation, MalformedReason> {
    let tool_names: Vec<_> = TOOL_NAME_RE.find_iter(invoke).collect();
    if tool_names.is_empty() {
        return Err(MalformedReason::MissingToolName);
    }
    if tool_names.len() > 1 {
        return Err(MalformedReason::MultipleToolNames);
    }

    let parameter_blocks: Vec<_> = PARAMETERS_RE.find_iter(invoke).collect();
    if parameter_blocks.is_empty() {
        return Err(MalformedReason::MissingParameters);
    }
    if parameter_blocks.len() > 1 {
        return Err(MalformedReason::MultipleParameters);
    }

    let inner = parameter_blocks[0]
        .as_str()
        .trim_start_matches("<parameters>")
        .trim_end_matches("</parameters>");

    let tags: Vec<_> = TAG_RE.find_iter(inner).collect();
    if tags.len() % 2 != 0 {
        return Err(MalformedReason::UnbalancedParameterTags);
    }

    let mut parameters = Vec::with_capacity(tags.len() / 2);
    for pair in tags.chunks_exact(2) {
        let opening = pair[0];
        let closing = pair[1];
        let closing_text = closing.as_str();
        // A valid closing tag is the opening tag with '/' inserted after '<'.
        if !closing_text.starts_with("</")
            || opening.as_str() != format!("<{}", &closing_text[2..])
        {
            return Err(MalformedReason::MismatchedParameterTags);
        }
        let name = &opening.as_str()[1..opening.as_str().len() - 1];
        let value = &inner[opening.end()..closing.start()];
        parameters.push((name.to_string(), value.to_string()));
    }

    let tool_name = tool_names[0]
        .as_str()
        .trim_start_matches("<tool_name>")
        .trim_end_matches("</tool_name>")
        .to_string();

    Ok(Invocation {
        tool_name,
        parameters,
    })
}
