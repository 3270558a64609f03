//! HTTP gateway between the browser chat page and the completion provider.

use crate::ai::CompletionService;
use crate::models::{ChatRequest, ChatResponse, ErrorResponse};
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }
}

/// Failures surfaced by `POST /api/chat`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Message is required.")]
    MissingMessage,

    #[error("Failed to get response from chatbot.")]
    Upstream(#[source] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingMessage => {
                let body = ErrorResponse {
                    error: self.to_string(),
                    details: None,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Upstream(ref source) => {
                error!("Chatbot error: {}", source);
                let body = ErrorResponse {
                    error: self.to_string(),
                    details: Some(source.to_string()),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<ChatResponse>, ApiError> {
    // Unreadable bodies are reported as 500s, not extractor rejections.
    let request: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::Upstream(e.into()))?;

    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or(ApiError::MissingMessage)?;

    info!("Chat request ({} chars)", message.len());
    let response = state
        .completion
        .complete(&message)
        .await
        .map_err(ApiError::Upstream)?;

    Ok(Json(ChatResponse { response }))
}

/// Bind `addr` and serve the gateway until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
