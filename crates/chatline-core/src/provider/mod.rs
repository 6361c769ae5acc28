use std::pin::Pin;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{self, ChatlineError};
use crate::message::{Message, MessageFormat};

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.0;
/// Nucleus sampling cutoff sent with every request.
pub const TOP_P: f64 = 0.1;

/// Default HTTP timeout for provider clients.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Incremental text fragments of a streamed completion.
pub type TextStream = Pin<Box<dyn futures::Stream<Item = error::Result<String>> + Send>>;

/// Static description of one hosted provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub name: String,
    pub base_url: String,
    /// Key looked up in [`crate::config::Config`] to obtain the API credential.
    pub credential_key: String,
    pub message_format: MessageFormat,
}

impl ProviderProfile {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        credential_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            credential_key: credential_key.into(),
            message_format: MessageFormat::Plain,
        }
    }

    pub fn message_format(mut self, format: MessageFormat) -> Self {
        self.message_format = format;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    ToolCalls,
    Length,
    ContentFilter,
    Other(String),
}

impl FinishReason {
    pub fn parse(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "tool_calls" => FinishReason::ToolCalls,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Uniform request interface over hosted chat providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Send the conversation and return the full reply text.
    async fn chat(&self, messages: &[Message], model: &str) -> error::Result<String>;

    /// Send the conversation and return the reply as it is generated.
    async fn stream(&self, messages: &[Message], model: &str) -> error::Result<TextStream>;
}

/// Build an HTTP client with the given timeout.
pub fn build_client(timeout_ms: Option<u64>) -> error::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(
            timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        ))
        .build()
        .map_err(|e| ChatlineError::config(format!("Failed to build HTTP client: {e}")))
}

/// Look up a built-in provider profile by name.
pub fn by_name(name: &str) -> Option<ProviderProfile> {
    match name {
        deepseek::NAME => Some(deepseek::DeepSeekProvider::profile()),
        internlm::NAME => Some(internlm::InternLmProvider::profile()),
        _ => None,
    }
}

/// All built-in provider profiles.
pub fn builtin() -> Vec<ProviderProfile> {
    vec![
        deepseek::DeepSeekProvider::profile(),
        internlm::InternLmProvider::profile(),
    ]
}

pub mod adapter;
pub mod client;
pub mod deepseek;
pub mod internlm;
