use super::{GenerationRequest, TextGenerator};
use crate::errors::AiGenerationError;
use async_trait::async_trait;
use common::AppConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini `generateContent` backend
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, AiGenerationError> {
        Self::with_options(api_key, DEFAULT_BASE_URL, Duration::from_secs(60))
    }

    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiGenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiGenerationError::Transport(
                "Gemini API key cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiGenerationError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AiGenerationError> {
        Self::with_options(
            config.api_key.clone(),
            config.gemini_base_url.clone(),
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_body(request: &GenerationRequest) -> GeminiRequest {
        let generation_config = request
            .response_schema
            .as_ref()
            .map(|schema| GeminiGenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema.clone()),
            });

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config,
        }
    }

    fn classify_reqwest_error(&self, error: reqwest::Error) -> AiGenerationError {
        if error.is_timeout() {
            AiGenerationError::Timeout(self.timeout)
        } else {
            AiGenerationError::Transport(error.without_url().to_string())
        }
    }

    /// Gemini wraps failures as `{"error": {"message": ...}}`; fall back to the raw body
    fn service_error(status: u16, body: &str) -> AiGenerationError {
        let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or_else(|| body.chars().take(300).collect());

        AiGenerationError::Service { status, message }
    }

    fn extract_text(response: GeminiResponse) -> Result<String, AiGenerationError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            warn!(block_reason = reason, "Gemini blocked the prompt");
            return Err(AiGenerationError::EmptyResponse);
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(AiGenerationError::EmptyResponse)?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            debug!(finish_reason = ?candidate.finish_reason, "Gemini candidate had no text");
            return Err(AiGenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, AiGenerationError> {
        let start_time = Instant::now();
        let body = Self::build_body(&request);

        info!(
            model = %request.model,
            structured = request.is_structured(),
            "Sending request to Gemini: {}",
            request.prompt.trim().chars().take(50).collect::<String>()
        );

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(Self::service_error(status.as_u16(), &error_text));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AiGenerationError::malformed(format!("Failed to parse response: {e}")))?;

        let text = Self::extract_text(gemini_response)?;

        debug!(
            model = %request.model,
            duration_ms = start_time.elapsed().as_millis() as u64,
            chars = text.len(),
            "Received response from Gemini"
        );
        Ok(text)
    }
}

// Gemini REST request/response types
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: Option<String>,
}
