//! Emote aggregation client library.
//!
//! Fetches the combined emote list of a channel from the emote aggregation
//! API, groups emotes whose codes collide, and keeps the lookup session
//! state that the web frontend renders.

pub mod client;
pub mod duplicates;
pub mod image;
pub mod models;
pub mod session;

pub use client::EmoteClient;
pub use duplicates::{DuplicateGroup, DuplicateGroups, DuplicateStats, group_duplicates};
pub use image::best_variant;
pub use models::{Emote, ImageVariant, Provider};
pub use session::{Session, SessionError, SessionView};

/// Message shown for failures that carry no useful detail for the user.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Unified error type for the emote-client crate.
#[derive(Debug, thiserror::Error)]
pub enum EmoteError {
    #[error("Channel \"{channel}\" not found")]
    NotFound { channel: String },

    #[error("Failed to fetch emotes (HTTP {status})")]
    Upstream { status: u16 },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Coarse failure class of an [`EmoteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Upstream,
    Transport,
}

impl EmoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Transport(_) | Self::Decode(_) | Self::UrlParse(_) | Self::InvalidBaseUrl(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// The single human-readable message surfaced in the error panel.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NotFound | ErrorKind::Upstream => self.to_string(),
            ErrorKind::Transport => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
