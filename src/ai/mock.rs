use super::CompletionService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockCompletionClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail with an [`Error::AiProvider`] carrying `message`.
    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Messages passed to `complete`, in call order.
    pub fn received_messages(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletionClient {
    async fn complete(&self, message: &str) -> Result<String> {
        let count = {
            let mut received = self.received.lock().unwrap();
            received.push(message.to_string());
            received.len()
        };

        if let Some(failure) = &self.failure {
            return Err(Error::AiProvider(failure.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(format!("Mock reply to: {}", message))
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
