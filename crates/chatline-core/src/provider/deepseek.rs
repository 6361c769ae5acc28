//! DeepSeek provider — OpenAI-compatible API.

use crate::message::MessageFormat;
use crate::provider::ProviderProfile;
use crate::provider::adapter::ProviderAdapter;

pub const NAME: &str = "deepseek";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEEPSEEK_CREDENTIAL_KEY: &str = "DEEPSEEK_API_KEY";

/// DeepSeek provider — a [`ProviderAdapter`] bound to DeepSeek's endpoint.
pub struct DeepSeekProvider;

impl DeepSeekProvider {
    pub fn profile() -> ProviderProfile {
        ProviderProfile::new(NAME, DEEPSEEK_BASE_URL, DEEPSEEK_CREDENTIAL_KEY)
            .message_format(MessageFormat::Plain)
    }

    /// Create an uninitialized DeepSeek adapter.
    /// Models: deepseek-chat, deepseek-reasoner
    pub fn create() -> ProviderAdapter {
        ProviderAdapter::new(Self::profile())
    }
}
