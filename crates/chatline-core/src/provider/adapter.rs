//! Generic adapter over one OpenAI-compatible hosted provider.
//!
//! An adapter is created uninitialized from a [`ProviderProfile`], wired to a
//! credential with [`ProviderAdapter::init`], and then serves any number of
//! independent [`chat`](ProviderAdapter::chat) and
//! [`stream`](ProviderAdapter::stream) calls.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::{self, ChatlineError};
use crate::message::{self, Message};
use crate::provider::client::{ChatClient, ChunkStream};
use crate::provider::{
    ChatProvider, FinishReason, ProviderProfile, TEMPERATURE, TOP_P, TextStream,
};

pub struct ProviderAdapter {
    profile: ProviderProfile,
    timeout_ms: Option<u64>,
    client: Option<ChatClient>,
}

impl ProviderAdapter {
    pub fn new(profile: ProviderProfile) -> Self {
        Self {
            profile,
            timeout_ms: None,
            client: None,
        }
    }

    /// HTTP timeout used by clients created on the next [`init`](Self::init).
    pub fn timeout(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    /// Bind the adapter to its credential, replacing any previous client.
    ///
    /// `selector` names the model family the caller intends to use. It is
    /// recorded but not validated.
    pub fn init(&mut self, selector: &str, config: &Config) -> error::Result<()> {
        let api_key = config.get_env_required(&self.profile.credential_key)?;
        let client = ChatClient::new(
            self.profile.name.clone(),
            &self.profile.base_url,
            api_key,
            self.timeout_ms,
        )?;

        debug!(
            provider = %self.profile.name,
            selector,
            endpoint = %client.endpoint(),
            reinit = self.client.is_some(),
            "Provider initialized"
        );

        self.client = Some(client);
        Ok(())
    }

    pub fn get_client(&self) -> Option<&ChatClient> {
        self.client.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    fn require_client(&self) -> error::Result<&ChatClient> {
        self.client
            .as_ref()
            .ok_or_else(|| ChatlineError::not_initialized(&self.profile.name))
    }

    fn build_request_body(
        &self,
        messages: &[Message],
        model: &str,
        stream: bool,
    ) -> error::Result<serde_json::Value> {
        if messages.is_empty() {
            return Err(ChatlineError::InvalidRequest {
                message: "at least one message is required".to_string(),
            });
        }

        let mut body = json!({
            "model": model,
            "messages": message::to_wire(messages, self.profile.message_format),
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
        });
        if stream {
            body["stream"] = json!(true);
        }
        Ok(body)
    }

    /// Send the conversation and return the first choice's text.
    pub async fn chat(&self, messages: &[Message], model: &str) -> error::Result<String> {
        let client = self.require_client()?;
        let body = self.build_request_body(messages, model, false)?;

        debug!(
            provider = %self.profile.name,
            model,
            messages = messages.len(),
            "Sending chat request"
        );

        let resp = client.create(&body).await?;
        response_text(&resp)
            .map(String::from)
            .ok_or_else(|| ChatlineError::empty_response(&self.profile.name))
    }

    /// Send the conversation and yield text fragments as they arrive.
    pub async fn stream(&self, messages: &[Message], model: &str) -> error::Result<TextStream> {
        let client = self.require_client()?;
        let body = self.build_request_body(messages, model, true)?;

        debug!(
            provider = %self.profile.name,
            model,
            messages = messages.len(),
            "Sending streaming chat request"
        );

        let chunks = client.create_stream(&body).await?;
        Ok(text_fragments(self.profile.name.clone(), chunks))
    }
}

#[async_trait]
impl ChatProvider for ProviderAdapter {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn chat(&self, messages: &[Message], model: &str) -> error::Result<String> {
        ProviderAdapter::chat(self, messages, model).await
    }

    async fn stream(&self, messages: &[Message], model: &str) -> error::Result<TextStream> {
        ProviderAdapter::stream(self, messages, model).await
    }
}

/// Non-empty `choices[0].message.content` of a completion response.
fn response_text(body: &serde_json::Value) -> Option<&str> {
    body["choices"]
        .as_array()
        .and_then(|c| c.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .filter(|text| !text.is_empty())
}

/// The parts of a streamed chunk the adapter cares about.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChunkDelta {
    pub content: Option<String>,
    pub finish_reason: Option<FinishReason>,
}

/// Extract the first choice's delta, or `None` for a chunk with no choices.
pub fn parse_delta(chunk: &serde_json::Value) -> Option<ChunkDelta> {
    let choice = chunk["choices"].as_array()?.first()?;
    Some(ChunkDelta {
        content: choice["delta"]["content"]
            .as_str()
            .filter(|t| !t.is_empty())
            .map(String::from),
        finish_reason: choice["finish_reason"].as_str().map(FinishReason::parse),
    })
}

/// Turn raw completion chunks into the text fragments they carry.
///
/// Chunks without choices are skipped; some hosts send one before any
/// content. The last finish reason seen is logged once the chunks run out.
pub fn text_fragments(provider: String, mut chunks: ChunkStream) -> TextStream {
    let stream = async_stream::try_stream! {
        let mut stop_reason: Option<FinishReason> = None;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            let Some(delta) = parse_delta(&chunk) else {
                continue;
            };
            stop_reason = delta.finish_reason;
            if let Some(content) = delta.content {
                yield content;
            }
        }

        debug!(provider = %provider, stop_reason = ?stop_reason, "Stream finished");
    };

    Box::pin(stream)
}
