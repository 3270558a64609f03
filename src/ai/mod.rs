//! AI service integration for answering chat messages
//!
//! Provides the completion seam the gateway calls into, backed by Google's
//! Gemini `generateContent` API or by a mock in tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiChatClient;
pub use mock::MockCompletionClient;

use crate::Result;
use async_trait::async_trait;

/// Reply used when the provider response has no text at the extraction path.
pub const FALLBACK_RESPONSE: &str = "No response from AI.";

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send one message to the provider and return its reply text.
    async fn complete(&self, message: &str) -> Result<String>;
}
