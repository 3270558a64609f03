use super::ChatGateway;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory gateway that records what it was sent.
pub struct MockGateway {
    reply: Option<String>,
    failure: Option<String>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            reply: None,
            failure: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(mut self, reply: String) -> Self {
        self.reply = Some(reply);
        self
    }

    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn send(&self, message: &str) -> Result<String> {
        self.sent.lock().unwrap().push(message.to_string());

        if let Some(failure) = &self.failure {
            return Err(Error::Gateway(failure.clone()));
        }

        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| format!("Echo: {}", message)))
    }
}
