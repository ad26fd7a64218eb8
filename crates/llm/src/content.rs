//! Product content operations on top of a text-generation backend
//!
//! Description generation degrades to a fixed fallback string. Copy and
//! analysis report failures, including responses that do not validate.

use crate::errors::AiGenerationError;
use crate::prompts::{analysis_prompt, description_prompt, marketing_copy_prompt};
use crate::providers::{GeminiProvider, GenerationRequest, TextGenerator};
use crate::schema::{content_analysis_schema, marketing_copy_schema};
use async_trait::async_trait;
use common::config::{DEFAULT_STRUCTURED_MODEL, DEFAULT_TEXT_MODEL};
use common::{AppConfig, OperationTimer};
use domain::value_objects::content::MAX_SUGGESTIONS;
use domain::{ContentAnalysis, MarketingCopy, Product};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{error, warn};

pub const DESCRIPTION_FALLBACK: &str = "Failed to generate description. Please try again.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The three content operations the application relies on
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Never fails; returns [`DESCRIPTION_FALLBACK`] when generation does
    async fn generate_description(&self, name: &str, category: &str) -> String;

    async fn generate_marketing_copy(
        &self,
        product: &Product,
    ) -> Result<MarketingCopy, AiGenerationError>;

    async fn analyze_content(&self, description: &str) -> Result<ContentAnalysis, AiGenerationError>;
}

pub struct ContentClient<P = GeminiProvider> {
    provider: P,
    text_model: String,
    structured_model: String,
    timeout: Duration,
}

impl ContentClient<GeminiProvider> {
    pub fn from_config(config: &AppConfig) -> Result<Self, AiGenerationError> {
        let provider = GeminiProvider::from_config(config)?;
        Ok(Self::new(provider)
            .with_models(&config.text_model, &config.structured_model)
            .with_timeout(config.request_timeout))
    }
}

impl<P: TextGenerator> ContentClient<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            structured_model: DEFAULT_STRUCTURED_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_models(mut self, text_model: &str, structured_model: &str) -> Self {
        self.text_model = text_model.to_string();
        self.structured_model = structured_model.to_string();
        self
    }

    /// Upper bound for every call, applied on top of any transport timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn run(
        &self,
        operation: &'static str,
        request: GenerationRequest,
    ) -> Result<String, AiGenerationError> {
        let mut timer = OperationTimer::new(operation);
        timer.add_field("provider", self.provider.name());
        timer.add_field("model", &request.model);

        let result = match tokio::time::timeout(self.timeout, self.provider.generate(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(AiGenerationError::Timeout(self.timeout)),
        };

        timer.finish_with_result(&result);
        result
    }
}

#[async_trait]
impl<P: TextGenerator> ContentGenerator for ContentClient<P> {
    async fn generate_description(&self, name: &str, category: &str) -> String {
        let request = GenerationRequest::text(&self.text_model, description_prompt(name, category));

        match self.run("generate_description", request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                error!(error = %e, "Error generating description");
                DESCRIPTION_FALLBACK.to_string()
            }
        }
    }

    async fn generate_marketing_copy(
        &self,
        product: &Product,
    ) -> Result<MarketingCopy, AiGenerationError> {
        let request = GenerationRequest::structured(
            &self.structured_model,
            marketing_copy_prompt(product),
            marketing_copy_schema(),
        );

        let text = self.run("generate_marketing_copy", request).await?;
        parse_marketing_copy(&text).map_err(|e| {
            warn!(product_id = %product.id, error = %e, "Rejected marketing copy response");
            e
        })
    }

    async fn analyze_content(&self, description: &str) -> Result<ContentAnalysis, AiGenerationError> {
        let request = GenerationRequest::structured(
            &self.structured_model,
            analysis_prompt(description),
            content_analysis_schema(),
        );

        let text = self.run("analyze_content", request).await?;
        parse_content_analysis(&text).map_err(|e| {
            warn!(error = %e, "Rejected content analysis response");
            e
        })
    }
}

/// Parse a JSON payload, tolerating a surrounding markdown code fence
fn parse_json_object(text: &str) -> Result<Map<String, Value>, AiGenerationError> {
    let trimmed = text.trim();
    let payload = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AiGenerationError::malformed(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(AiGenerationError::malformed(format!("invalid JSON: {e}"))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, AiGenerationError> {
    object
        .get(field)
        .ok_or_else(|| AiGenerationError::malformed(format!("missing field '{field}'")))
}

fn required_str(object: &Map<String, Value>, field: &str) -> Result<String, AiGenerationError> {
    match required(object, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(AiGenerationError::malformed(format!(
            "field '{field}' must be a string, got {}",
            json_type(other)
        ))),
    }
}

pub(crate) fn parse_marketing_copy(text: &str) -> Result<MarketingCopy, AiGenerationError> {
    let object = parse_json_object(text)?;

    MarketingCopy::new(
        required_str(&object, "adHeadline")?,
        required_str(&object, "adBody")?,
        required_str(&object, "socialMediaPost")?,
    )
    .map_err(|e| AiGenerationError::malformed(e.to_string()))
}

pub(crate) fn parse_content_analysis(text: &str) -> Result<ContentAnalysis, AiGenerationError> {
    let object = parse_json_object(text)?;

    let tone = required_str(&object, "tone")?;

    let clarity_score = match required(&object, "clarityScore")? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AiGenerationError::malformed("clarityScore is not representable"))?,
        other => {
            return Err(AiGenerationError::malformed(format!(
                "field 'clarityScore' must be a number, got {}",
                json_type(other)
            )))
        }
    };

    let mut suggestions = match required(&object, "suggestions")? {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.trim().to_string()),
                other => Err(AiGenerationError::malformed(format!(
                    "suggestions must be strings, got {}",
                    json_type(other)
                ))),
            })
            .filter(|item| !matches!(item, Ok(s) if s.is_empty()))
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(AiGenerationError::malformed(format!(
                "field 'suggestions' must be an array, got {}",
                json_type(other)
            )))
        }
    };

    if suggestions.len() > MAX_SUGGESTIONS {
        warn!(
            received = suggestions.len(),
            kept = MAX_SUGGESTIONS,
            "Truncating surplus suggestions"
        );
        suggestions.truncate(MAX_SUGGESTIONS);
    }

    ContentAnalysis::new(tone, clarity_score, suggestions)
        .map_err(|e| AiGenerationError::malformed(e.to_string()))
}
