use crate::errors::AiGenerationError;
use async_trait::async_trait;
use serde_json::Value;

pub mod gemini_provider;

pub use gemini_provider::GeminiProvider;

/// A single prompt sent to a text-generation backend
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    /// When set, the backend is asked for JSON matching this schema
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(model: &str, prompt: impl Into<String>) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn structured(model: &str, prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Stateless request/response text generation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Returns the generated text (a JSON document for structured requests)
    async fn generate(&self, request: GenerationRequest) -> Result<String, AiGenerationError>;
}
