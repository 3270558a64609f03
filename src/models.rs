//! Data models and structures
//!
//! Defines the transcript records, the quiz parameters selected alongside each
//! question, the gateway's JSON bodies, and runtime configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Hindi,
    English,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Hindi => "Hindi",
            Language::English => "English",
        })
    }
}

/// School standard the questions are pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    #[value(name = "1st")]
    First,
    #[value(name = "2nd")]
    Second,
    #[value(name = "3rd")]
    Third,
    #[value(name = "4th")]
    Fourth,
    #[value(name = "5th")]
    Fifth,
    #[value(name = "6th")]
    Sixth,
    #[value(name = "7th")]
    Seventh,
    #[value(name = "8th")]
    Eighth,
    #[value(name = "9th")]
    Ninth,
    #[value(name = "10th")]
    Tenth,
    #[value(name = "11th")]
    Eleventh,
    #[value(name = "12th")]
    Twelfth,
    Graduation,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::First => "1st",
            Level::Second => "2nd",
            Level::Third => "3rd",
            Level::Fourth => "4th",
            Level::Fifth => "5th",
            Level::Sixth => "6th",
            Level::Seventh => "7th",
            Level::Eighth => "8th",
            Level::Ninth => "9th",
            Level::Tenth => "10th",
            Level::Eleventh => "11th",
            Level::Twelfth => "12th",
            Level::Graduation => "Graduation",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    OneLine,
    Short,
    Medium,
    Long,
    Descriptive,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::TrueFalse => "True-False",
            QuestionType::OneLine => "One Line",
            QuestionType::Short => "Short",
            QuestionType::Medium => "Medium",
            QuestionType::Long => "Long",
            QuestionType::Descriptive => "Descriptive",
        })
    }
}

/// Form selections interpolated into the instruction. Unset fields render as
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizParameters {
    pub language: Option<Language>,
    pub level: Option<Level>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
    pub count: Option<u32>,
}

// Gateway request/response bodies
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// Configuration
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Not validated at startup; chat requests fail while it is unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Option<Duration>,
    pub listen_addr: SocketAddr,
    pub gateway_url: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_timeout = var("GEMINI_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    crate::Error::Config(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })
            })
            .transpose()?;

        let listen_raw = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw.parse().map_err(|_| {
            crate::Error::Config(format!("LISTEN_ADDR is not a socket address: '{}'", listen_raw))
        })?;

        Ok(Self {
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_timeout,
            listen_addr,
            gateway_url: var("QUIZCHAT_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        })
    }
}
