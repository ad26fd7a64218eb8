use async_trait::async_trait;
use chrono::Utc;
use domain::{Product, ProductStatus};
use llm::{
    AiGenerationError, ContentClient, ContentGenerator, GeminiProvider, GenerationRequest,
    TextGenerator, DESCRIPTION_FALLBACK,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;

fn envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn client(server: &ServerGuard) -> ContentClient<GeminiProvider> {
    let provider = GeminiProvider::with_options("test-key", server.url(), Duration::from_secs(5))
        .expect("provider");
    ContentClient::new(provider).with_models("text-model", "structured-model")
}

fn product() -> Product {
    Product {
        id: "prod_1".to_string(),
        name: "AI-Powered Code Assistant".to_string(),
        description: "Writes boilerplate and finds bugs.".to_string(),
        category: "SaaS / Developer Tool".to_string(),
        price: 19.99,
        status: ProductStatus::Published,
        image_url: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_generate_description_returns_trimmed_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "role": "user" }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope("  A friendly widget that saves you time.\n"))
        .create_async()
        .await;

    let description = client(&server).generate_description("Widget", "Tool").await;

    assert_eq!(description, "A friendly widget that saves you time.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_description_failure_uses_fallback() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/text-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let description = client(&server).generate_description("Widget", "Tool").await;
    assert_eq!(description, DESCRIPTION_FALLBACK);
    assert_eq!(description, "Failed to generate description. Please try again.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_description_unreachable_service_uses_fallback() {
    // Nothing listens on port 9 (discard) in test environments
    let provider = GeminiProvider::with_options("k", "http://127.0.0.1:9", Duration::from_secs(2))
        .expect("provider");
    let description = ContentClient::new(provider)
        .generate_description("Widget", "Tool")
        .await;
    assert_eq!(description, DESCRIPTION_FALLBACK);
}

#[tokio::test]
async fn test_marketing_copy_requests_schema_and_parses_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/structured-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "required": ["adHeadline", "adBody", "socialMediaPost"] }
            }
        })))
        .with_status(200)
        .with_body(envelope(
            r#"{"adHeadline": "Code at the speed of thought", "adBody": "Let your assistant handle boilerplate while you focus on what matters.", "socialMediaPost": "Meet your new pair programmer #AI #DevTools"}"#,
        ))
        .create_async()
        .await;

    let copy = client(&server)
        .generate_marketing_copy(&product())
        .await
        .expect("copy generated");

    assert_eq!(copy.ad_headline, "Code at the speed of thought");
    assert!(copy.ad_body.starts_with("Let your assistant"));
    assert!(copy.social_media_post.contains("#AI"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_marketing_copy_malformed_json_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/structured-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_body(envelope("{\"adHeadline\": \"Truncated"))
        .create_async()
        .await;

    let err = client(&server)
        .generate_marketing_copy(&product())
        .await
        .unwrap_err();
    assert!(matches!(err, AiGenerationError::MalformedResponse(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_marketing_copy_service_error_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/structured-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(503)
        .with_body(r#"{"error": {"message": "The model is overloaded."}}"#)
        .create_async()
        .await;

    let err = client(&server)
        .generate_marketing_copy(&product())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AiGenerationError::Service {
            status: 503,
            message: "The model is overloaded.".to_string()
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_analyze_content_within_bounds() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/structured-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_body(envelope(
            r#"{"tone": "Professional and confident", "clarityScore": 7, "suggestions": ["Quantify the time saved", "Name supported languages", "Add a call to action"]}"#,
        ))
        .create_async()
        .await;

    let analysis = client(&server)
        .analyze_content("Writes boilerplate and finds bugs.")
        .await
        .expect("analysis");

    assert_eq!(analysis.tone, "Professional and confident");
    assert!((1..=10).contains(&analysis.clarity_score));
    assert!((2..=3).contains(&analysis.suggestions.len()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_analyze_content_out_of_range_score_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/structured-model:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_body(envelope(
            r#"{"tone": "Flat", "clarityScore": 42, "suggestions": ["a", "b"]}"#,
        ))
        .create_async()
        .await;

    let err = client(&server).analyze_content("x").await.unwrap_err();
    assert!(matches!(err, AiGenerationError::MalformedResponse(_)));
    mock.assert_async().await;
}

/// Backend that never answers in time
struct StalledGenerator;

#[async_trait]
impl TextGenerator for StalledGenerator {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String, AiGenerationError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok("too late".to_string())
    }
}

#[tokio::test]
async fn test_timeout_fails_closed() {
    let timeout = Duration::from_millis(50);
    let client = ContentClient::new(StalledGenerator).with_timeout(timeout);

    let err = client.analyze_content("x").await.unwrap_err();
    assert_eq!(err, AiGenerationError::Timeout(timeout));

    let err = client.generate_marketing_copy(&product()).await.unwrap_err();
    assert_eq!(err, AiGenerationError::Timeout(timeout));

    assert_eq!(client.generate_description("a", "b").await, DESCRIPTION_FALLBACK);
}
