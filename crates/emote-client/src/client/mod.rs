//! Emote aggregation API client.
//!
//! Fetches the combined Twitch/7TV/BTTV/FFZ emote list of a channel in one
//! request. Responses are not cached; every lookup hits the API.

#[cfg(test)]
mod tests;

use std::time::Duration;

use url::Url;

use crate::EmoteError;
use crate::models::Emote;

pub const DEFAULT_BASE_URL: &str = "https://emotes.crippled.dev/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the emote aggregation API.
#[derive(Debug, Clone)]
pub struct EmoteClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EmoteClient {
    /// Create a client for the given API root (e.g. `https://emotes.crippled.dev/v1`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EmoteError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(EmoteError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/channel/{channel}/all`, with the channel as one encoded segment.
    pub fn channel_url(&self, channel: &str) -> Result<Url, EmoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EmoteError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["channel", channel, "all"]);
        Ok(url)
    }

    /// Fetch every emote usable in `channel`.
    pub async fn channel_emotes(&self, channel: &str) -> Result<Vec<Emote>, EmoteError> {
        let url = self.channel_url(channel)?;
        let body = self.fetch(url, channel).await?;
        let emotes: Vec<Emote> = serde_json::from_str(&body)?;

        let unknown = emotes.iter().filter(|e| !e.provider.is_known()).count();
        if unknown > 0 {
            tracing::warn!(channel, unknown, "Emote payload contains unknown providers");
        }
        tracing::debug!(count = emotes.len(), channel, "Fetched channel emotes");
        Ok(emotes)
    }

    /// Send a GET request and map non-success statuses to errors.
    async fn fetch(&self, url: Url, channel: &str) -> Result<String, EmoteError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EmoteError::NotFound {
                channel: channel.to_string(),
            });
        }

        if !status.is_success() {
            tracing::warn!(channel, status = status.as_u16(), "Emote API returned an error");
            return Err(EmoteError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}
