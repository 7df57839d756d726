//! Runtime application configuration loaded from the environment.

use std::time::Duration;

use super::defaults::{
    self, BIND_ADDRESS, CASE_SENSITIVE_DEFAULT, EMOTE_API_BASE_URL, REQUEST_TIMEOUT_SECS,
    SERVER_PORT,
};
use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub bind_address: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub case_sensitive_default: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup. Missing or invalid values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            let default = defaults::get_default(key).unwrap_or_default();
            let Some(raw) = lookup(key) else {
                return default.to_string();
            };
            let value = raw.trim();
            if value.is_empty() {
                return default.to_string();
            }
            match validate_setting(key, value) {
                Ok(()) => value.to_string(),
                Err(reason) => {
                    tracing::warn!(key, value, reason = %reason, "Invalid setting, using default {default}");
                    default.to_string()
                }
            }
        };

        Self {
            server_port: g(SERVER_PORT).parse().unwrap_or(8080),
            bind_address: g(BIND_ADDRESS),
            api_base_url: g(EMOTE_API_BASE_URL),
            request_timeout_secs: g(REQUEST_TIMEOUT_SECS).parse().unwrap_or(10),
            case_sensitive_default: g(CASE_SENSITIVE_DEFAULT) == "true",
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `host:port` the server listens on.
    pub fn listen_addr(&self) -> String {
        if self.bind_address.contains(':') {
            format!("[{}]:{}", self.bind_address, self.server_port)
        } else {
            format!("{}:{}", self.bind_address, self.server_port)
        }
    }
}
