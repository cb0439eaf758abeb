//! Provider style renderers.
//!
//! One renderer per provider schema convention, all implementing the same
//! `finalize` contract over an already type-cast tool. Mirrors the driver
//! abstraction used for provider APIs: the enumeration names the convention,
//! the factory selects the concrete renderer, and callers stay
//! provider-agnostic.

pub mod anthropic;
pub mod cohere;
pub mod google;
pub mod openai;

use serde_json::Value as JsonValue;

use crate::types::ToolSpec;

pub use anthropic::InputSchemaRenderer;
pub use cohere::CohereRenderer;
pub use google::GoogleRenderer;
pub use openai::FunctionWrappedRenderer;

/// Closed enumeration of target schema conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderStyle {
    OpenAi,
    Mistral,
    FireworkAi,
    /// Anthropic tool-use API (`input_schema`).
    Anthropic,
    /// Anthropic legacy tag-grammar prompting convention.
    AnthropicPrompt,
    Google,
    Cohere,
    OssModel,
}

impl ProviderStyle {
    /// Styles whose identifier grammar rejects `.` in function names.
    pub fn requires_underscore_names(&self) -> bool {
        matches!(
            self,
            ProviderStyle::OpenAi
                | ProviderStyle::Mistral
                | ProviderStyle::Google
                | ProviderStyle::OssModel
                | ProviderStyle::Anthropic
                | ProviderStyle::Cohere
        )
    }
}

/// Common rendering contract: shape one type-cast tool into the provider's
/// document form. Lossy transforms happen here, at emission, never against
/// the canonical definition.
pub trait StyleRenderer: Send + Sync {
    fn finalize(&self, tool: ToolSpec) -> JsonValue;
}

/// Pass-through renderer: the tool object itself, emitted flat.
pub struct FlatRenderer;

impl StyleRenderer for FlatRenderer {
    fn finalize(&self, tool: ToolSpec) -> JsonValue {
        serde_json::to_value(&tool).unwrap_or(JsonValue::Null)
    }
}

/// Select the renderer for a provider style.
pub fn renderer_for(style: ProviderStyle) -> Box<dyn StyleRenderer> {
    match style {
        ProviderStyle::OpenAi | ProviderStyle::Mistral | ProviderStyle::FireworkAi => {
            Box::new(FunctionWrappedRenderer)
        }
        ProviderStyle::Anthropic => Box::new(InputSchemaRenderer),
        ProviderStyle::AnthropicPrompt | ProviderStyle::OssModel => Box::new(FlatRenderer),
        ProviderStyle::Google => Box::new(GoogleRenderer),
        ProviderStyle::Cohere => Box::new(CohereRenderer),
    }
}
