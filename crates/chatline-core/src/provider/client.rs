//! Client for OpenAI-compatible `chat/completions` endpoints.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;

use crate::error::{self, ChatlineError};

/// Raw JSON chunks of a streamed completion, `[DONE]` excluded.
pub type ChunkStream =
    Pin<Box<dyn futures::Stream<Item = error::Result<serde_json::Value>> + Send>>;

/// Live handle bound to one provider endpoint and credential.
#[derive(Debug)]
pub struct ChatClient {
    provider: String,
    endpoint: Url,
    api_key: SecretString,
    client: Client,
}

impl ChatClient {
    pub fn new(
        provider: impl Into<String>,
        base_url: &str,
        api_key: impl Into<String>,
        timeout_ms: Option<u64>,
    ) -> error::Result<Self> {
        Ok(Self {
            provider: provider.into(),
            endpoint: completions_url(base_url)?,
            api_key: SecretString::from(api_key.into()),
            client: crate::provider::build_client(timeout_ms)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn expose_api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    fn post(&self, body: &serde_json::Value) -> RequestBuilder {
        self.client
            .post(self.endpoint.clone())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(body)
    }

    async fn send(&self, body: &serde_json::Value) -> error::Result<Response> {
        let resp = self
            .post(body)
            .send()
            .await
            .map_err(|e| ChatlineError::Provider {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
                provider: self.provider.clone(),
                source: Some(Box::new(e)),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.unwrap_or(json!({}));
            let msg = body["error"]["message"]
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ChatlineError::Provider {
                message: msg,
                status: Some(status.as_u16()),
                provider: self.provider.clone(),
                source: None,
            });
        }

        Ok(resp)
    }

    /// Issue a non-streaming completion request and return the response body.
    pub async fn create(&self, body: &serde_json::Value) -> error::Result<serde_json::Value> {
        let resp = self.send(body).await?;
        resp.json().await.map_err(|e| ChatlineError::Provider {
            message: format!("Failed to parse response: {e}"),
            status: None,
            provider: self.provider.clone(),
            source: Some(Box::new(e)),
        })
    }

    /// Issue a streaming completion request.
    ///
    /// The response body is decoded as server-sent events. Chunks are read
    /// from the network only as the returned stream is polled.
    pub async fn create_stream(&self, body: &serde_json::Value) -> error::Result<ChunkStream> {
        let resp = self.send(body).await?;
        let provider = self.provider.clone();

        let stream = async_stream::try_stream! {
            let mut events = resp.bytes_stream().eventsource();

            while let Some(event) = events.next().await {
                let event = event
                    .map_err(|e| ChatlineError::stream(format!("Stream read error: {e}"), e))?;

                let data = event.data.trim();
                if data.is_empty() {
                    continue;
                }
                if data == "[DONE]" {
                    break;
                }

                let chunk = parse_chunk(&provider, data)?;
                yield chunk;
            }
        };

        Ok(Box::pin(stream))
    }
}

/// Decode one SSE `data:` payload. Providers may report failures in-band.
fn parse_chunk(provider: &str, data: &str) -> error::Result<serde_json::Value> {
    let chunk: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| ChatlineError::stream(format!("Invalid chunk JSON: {e}"), e))?;

    if let Some(msg) = chunk["error"]["message"].as_str() {
        return Err(ChatlineError::provider(provider, msg));
    }

    Ok(chunk)
}

/// `{base_url}/chat/completions`, with or without a trailing slash on the base.
fn completions_url(base_url: &str) -> error::Result<Url> {
    let mut base = Url::parse(base_url)
        .map_err(|e| ChatlineError::config(format!("Invalid base URL '{base_url}': {e}")))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(ChatlineError::config(format!(
            "Unsupported base URL scheme in '{base_url}'"
        )));
    }

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("chat/completions")
        .map_err(|e| ChatlineError::config(format!("Invalid base URL '{base_url}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_for_bare_host() {
        let url = completions_url("https://api.deepseek.com").unwrap();
        assert_eq!(url.as_str(), "https://api.deepseek.com/chat/completions");
    }

    #[test]
    fn endpoint_keeps_versioned_path() {
        let url = completions_url("https://puyu.openxlab.org.cn/puyu/api/v1/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://puyu.openxlab.org.cn/puyu/api/v1/chat/completions"
        );

        let url = completions_url("https://example.com/api/v1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/chat/completions");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        assert!(matches!(
            completions_url("not a url"),
            Err(ChatlineError::Config { .. })
        ));
        assert!(matches!(
            completions_url("ftp://example.com"),
            Err(ChatlineError::Config { .. })
        ));
    }

    #[test]
    fn malformed_chunk_keeps_parse_error_as_source() {
        let err = parse_chunk("test", "{not json").unwrap_err();
        assert!(matches!(err, ChatlineError::Stream { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client =
            ChatClient::new("test", "https://example.com", "sk-very-secret", None).unwrap();
        assert!(!format!("{client:?}").contains("sk-very-secret"));
        assert_eq!(client.expose_api_key(), "sk-very-secret");
    }
}
