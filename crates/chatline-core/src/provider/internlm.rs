//! InternLM (Puyu) provider — OpenAI-compatible API.

use crate::message::MessageFormat;
use crate::provider::ProviderProfile;
use crate::provider::adapter::ProviderAdapter;

pub const NAME: &str = "internlm";
pub const INTERNLM_BASE_URL: &str = "https://puyu.openxlab.org.cn/puyu/api/v1/";
pub const INTERNLM_CREDENTIAL_KEY: &str = "INTERNLM_API_TOKEN";

pub struct InternLmProvider;

impl InternLmProvider {
    pub fn profile() -> ProviderProfile {
        ProviderProfile::new(NAME, INTERNLM_BASE_URL, INTERNLM_CREDENTIAL_KEY)
            .message_format(MessageFormat::Plain)
    }

    /// Create an uninitialized InternLM adapter.
    pub fn create() -> ProviderAdapter {
        ProviderAdapter::new(Self::profile())
    }
}
