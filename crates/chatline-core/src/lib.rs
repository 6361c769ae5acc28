//! # Chatline Core
//!
//! Adapters for hosted chat-completion providers that speak the
//! OpenAI-compatible API. One generic [`ProviderAdapter`] is parameterized by
//! a [`ProviderProfile`]; DeepSeek and InternLM profiles ship built in.
//!
//! ```no_run
//! use chatline_core::{Config, Message};
//! use chatline_core::provider::deepseek::DeepSeekProvider;
//!
//! # async fn run() -> chatline_core::error::Result<()> {
//! let mut deepseek = DeepSeekProvider::create();
//! deepseek.init("deepseek", &Config::new())?;
//! let reply = deepseek.chat(&[Message::user("hi")], "deepseek-chat").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod provider;

pub use config::Config;
pub use error::ChatlineError;
pub use message::{Message, MessageFormat, Role};
pub use provider::adapter::ProviderAdapter;
pub use provider::client::ChatClient;
pub use provider::{ChatProvider, FinishReason, ProviderProfile, TextStream};
