use thiserror::Error;

/// Root error type for all Chatline operations.
#[derive(Error, Debug)]
pub enum ChatlineError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Provider '{provider}' used before init")]
    NotInitialized { provider: String },

    #[error("Provider '{provider}' returned no content")]
    EmptyResponse { provider: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Provider error: {message}")]
    Provider {
        message: String,
        status: Option<u16>,
        provider: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Stream error: {message}")]
    Stream {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ChatlineError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn not_initialized(provider: impl Into<String>) -> Self {
        Self::NotInitialized {
            provider: provider.into(),
        }
    }

    pub fn empty_response(provider: impl Into<String>) -> Self {
        Self::EmptyResponse {
            provider: provider.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            status: None,
            provider: provider.into(),
            source: None,
        }
    }

    pub fn stream(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Stream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status reported by the provider, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatlineError>;
