use serde::{Deserialize, Serialize};
use serde_json::json;

/// Message role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

/// Field layout used when serializing messages for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    /// OpenAI-native layout: `content` is a list of typed parts.
    OpenAi,
    /// `content` is a bare string. Accepted by most OpenAI-compatible hosts.
    Plain,
}

/// Translate messages into the chat-completions wire shape, oldest first.
pub fn to_wire(messages: &[Message], format: MessageFormat) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|msg| match format {
            MessageFormat::Plain => json!({
                "role": msg.role.as_str(),
                "content": msg.content,
            }),
            MessageFormat::OpenAi => json!({
                "role": msg.role.as_str(),
                "content": [{"type": "text", "text": msg.content}],
            }),
        })
        .collect()
}
