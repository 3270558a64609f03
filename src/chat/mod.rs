//! Client-side chat state
//!
//! Holds the transcript and quiz form, frames each question into an
//! instruction for display, and talks to the gateway's `/api/chat` endpoint.

pub mod composer;
pub mod http;
pub mod mock;

pub use composer::{Composer, PayloadMode, PendingRequest, ERROR_REPLY};
pub use http::HttpGatewayClient;
pub use mock::MockGateway;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Post one message to the gateway and return the reply text.
    async fn send(&self, message: &str) -> Result<String>;
}
