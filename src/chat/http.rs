use super::ChatGateway;
use crate::models::{ChatRequest, ChatResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Client for a running gateway's `POST /api/chat`.
pub struct HttpGatewayClient {
    client: Client,
    base_url: String,
}

impl HttpGatewayClient {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChatGateway for HttpGatewayClient {
    async fn send(&self, message: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            message: Some(message.to_string()),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach chat gateway at {}: {}", url, e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Chat gateway error (status {}): {}", status, error_text);
            return Err(Error::Gateway(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse gateway response: {}\nBody: {}", e, body);
            Error::Gateway(format!("Failed to parse gateway response: {}", e))
        })?;

        Ok(parsed.response)
    }
}
