//! Quiz chat gateway and client
//!
//! Forwards free-text questions to the Gemini `generateContent` API through a
//! small HTTP gateway, and keeps a client-side transcript that frames each
//! question with the selected quiz parameters.

pub mod ai;
pub mod chat;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
