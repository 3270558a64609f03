use super::client::GeminiHttpClient;
use super::types::{extract_reply_text, GenerateContentRequest};
use crate::ai::{CompletionService, FALLBACK_RESPONSE};
use crate::models::Config;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiChatClient {
    http: GeminiHttpClient,
}

impl GeminiChatClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: Option<String>,
        model: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gemini_api_key.clone(), config.gemini_model.clone())
            .with_base_url(config.gemini_base_url.clone())
            .with_timeout(config.gemini_timeout)
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl CompletionService for GeminiChatClient {
    async fn complete(&self, message: &str) -> Result<String> {
        let request = GenerateContentRequest::from_text(message);
        let response = self.http.generate_content(&request).await?;

        match extract_reply_text(&response) {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::warn!("Gemini response had no reply text, using fallback");
                Ok(FALLBACK_RESPONSE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
    const GENERATE_CONTENT_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";

    fn make_client(server: &MockServer) -> GeminiChatClient {
        GeminiChatClient::new(Some("test-key".to_string()), DEFAULT_MODEL.to_string())
            .with_base_url(server.uri())
    }

    async fn mount_reply(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(GENERATE_CONTENT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_complete_sends_envelope_with_key_query() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_CONTENT_PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "contents": [{ "parts": [{ "text": "Name a prime number" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Seven" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = make_client(&server)
            .complete("Name a prime number")
            .await
            .unwrap();
        assert_eq!(reply, "Seven");
    }

    #[tokio::test]
    async fn test_complete_returns_text_exactly() {
        let server = MockServer::start().await;
        let text = "  1. What is 3 x 4?\n  2. What is 10 / 2?\n";
        mount_reply(
            &server,
            json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }),
        )
        .await;

        let reply = make_client(&server).complete("times tables").await.unwrap();
        assert_eq!(reply, text);
    }

    #[tokio::test]
    async fn test_complete_falls_back_on_empty_candidates() {
        let server = MockServer::start().await;
        mount_reply(&server, json!({ "candidates": [] })).await;

        let reply = make_client(&server).complete("hi").await.unwrap();
        assert_eq!(reply, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_complete_falls_back_on_missing_parts() {
        let server = MockServer::start().await;
        mount_reply(
            &server,
            json!({ "candidates": [{ "content": { "role": "model" } }] }),
        )
        .await;

        let reply = make_client(&server).complete("hi").await.unwrap();
        assert_eq!(reply, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_provider_error_status_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_CONTENT_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let reply = make_client(&server).complete("hi").await.unwrap();
        assert_eq!(reply, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_malformed_json_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_CONTENT_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = make_client(&server).complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_CONTENT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "candidates": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = make_client(&server).with_timeout(Some(Duration::from_millis(100)));

        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_models_prefix_is_stripped_from_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiChatClient::new(Some("k".to_string()), "models/gemini-pro".to_string())
            .with_base_url(server.uri());
        assert_eq!(client.model(), "gemini-pro");
        client.complete("hi").await.unwrap();
    }

    #[test]
    fn test_from_config_uses_configured_model() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_MODEL" => Some("gemini-2.0-flash".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(GeminiChatClient::from_config(&config).model(), "gemini-2.0-flash");
    }
}
