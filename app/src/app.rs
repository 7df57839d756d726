use std::sync::Arc;

use emote_client::{EmoteClient, EmoteError, Session};
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Application configuration
    config: AppConfig,
    /// Emote aggregation API client
    client: EmoteClient,
    /// The browser session's lookup state
    session: Mutex<Session>,
    /// Cancelled on shutdown
    shutdown_token: CancellationToken,
}

impl SharedState {
    /// Create shared state, building the API client from the config.
    pub fn new(config: AppConfig) -> Result<Self, EmoteError> {
        let client = EmoteClient::new(&config.api_base_url, config.request_timeout())?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: AppConfig, client: EmoteClient) -> Self {
        let session = Session::new(config.case_sensitive_default);
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                client,
                session: Mutex::new(session),
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &EmoteClient {
        &self.inner.client
    }

    /// Lock the session. Never hold the guard across an API request.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.inner.session.lock().await
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
