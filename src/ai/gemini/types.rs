//! Gemini payload types and reply extraction.

use serde::Serialize;
use serde_json::Value;

/// JSON pointer for `candidates[0].content.parts[0].text`.
const REPLY_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Top-level `generateContent` request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// One content block with one text part.
    pub fn from_text(text: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// Pull the first candidate's first text part out of a response body.
///
/// The response is walked as untyped JSON so that any missing or mistyped
/// segment reads as "no reply" rather than a decode failure. Empty text also
/// counts as no reply.
pub fn extract_reply_text(response: &Value) -> Option<&str> {
    response
        .pointer(REPLY_TEXT_POINTER)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
