//! Transcript and form state behind the chat view.

use super::ChatGateway;
use crate::models::{Message, QuizParameters};
use crate::prompts;
use crate::Result;
use tracing::{debug, warn};

/// Bot message shown when the gateway call fails for any reason.
pub const ERROR_REPLY: &str = "Error occurred.";

/// What is transmitted to the gateway on submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadMode {
    /// Only the text the user typed. The framed instruction is display-only.
    #[default]
    RawInput,
    /// The framed instruction shown in the transcript.
    Instruction,
}

/// A submitted message waiting on its gateway reply.
#[derive(Debug)]
#[must_use = "pass the pending request back to `finish_submit`"]
pub struct PendingRequest {
    payload: String,
}

impl PendingRequest {
    /// Text to send to the gateway.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

pub struct Composer<G> {
    gateway: G,
    params: QuizParameters,
    payload_mode: PayloadMode,
    input: String,
    transcript: Vec<Message>,
    in_flight: usize,
    revision: u64,
}

impl<G: ChatGateway> Composer<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            params: QuizParameters::default(),
            payload_mode: PayloadMode::default(),
            input: String::new(),
            transcript: Vec::new(),
            in_flight: 0,
            revision: 0,
        }
    }

    pub fn with_parameters(mut self, params: QuizParameters) -> Self {
        self.params = params;
        self
    }

    pub fn with_payload_mode(mut self, mode: PayloadMode) -> Self {
        self.payload_mode = mode;
        self
    }

    pub fn parameters(&self) -> &QuizParameters {
        &self.params
    }

    pub fn parameters_mut(&mut self) -> &mut QuizParameters {
        &mut self.params
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// True while any submitted message is still waiting on the gateway.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Bumped on every transcript change; views scroll to the bottom when it
    /// moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record the user's message and return what must be sent.
    ///
    /// Returns `None` without touching any state when the input is blank.
    pub fn begin_submit(&mut self) -> Option<PendingRequest> {
        if self.input.trim().is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input);
        let instruction = prompts::quiz_instruction(&input, &self.params);

        let payload = match self.payload_mode {
            PayloadMode::RawInput => input,
            PayloadMode::Instruction => instruction.clone(),
        };

        self.push(Message::user(instruction));
        self.in_flight += 1;

        Some(PendingRequest { payload })
    }

    /// Append the bot reply for a request started with [`Self::begin_submit`].
    pub fn finish_submit(&mut self, pending: PendingRequest, reply: Result<String>) {
        let content = match reply {
            Ok(text) => text,
            Err(e) => {
                warn!("Chat request for {:?} failed: {}", pending.payload, e);
                ERROR_REPLY.to_string()
            }
        };

        self.push(Message::bot(content));
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Submit the current input and wait for the reply.
    ///
    /// Returns whether anything was sent.
    pub async fn submit(&mut self) -> bool {
        let Some(pending) = self.begin_submit() else {
            return false;
        };

        debug!("Sending chat message ({} chars)", pending.payload.len());
        let reply = self.gateway.send(pending.payload()).await;
        self.finish_submit(pending, reply);
        true
    }

    fn push(&mut self, message: Message) {
        self.transcript.push(message);
        self.revision += 1;
    }
}
