//! Lookup session state.
//!
//! Holds what one browser session works with: the submitted channel, the
//! case-sensitivity toggle, and the outcome of the last lookup. Grouping is
//! never stored; it is recomputed from the last emote list on every view.

mod view;

use chrono::{DateTime, Utc};

use crate::EmoteError;
use crate::duplicates::{DuplicateGroups, group_duplicates};
use crate::models::Emote;

pub use view::{EmoteView, GroupView, SessionView};

/// Reasons a lookup cannot be started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Channel name is required")]
    EmptyChannel,

    #[error("A lookup is already in progress")]
    Busy,
}

#[derive(Debug, Clone)]
struct LookupResult {
    emotes: Vec<Emote>,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    channel: String,
    case_sensitive: bool,
    loading: bool,
    error: Option<String>,
    result: Option<LookupResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Session {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            channel: String::new(),
            case_sensitive,
            loading: false,
            error: None,
            result: None,
        }
    }

    /// Start a lookup for the submitted channel name.
    ///
    /// Returns the trimmed channel to fetch. The caller must report the
    /// outcome through [`Session::finish_lookup`].
    pub fn begin_lookup(&mut self, raw_channel: &str) -> Result<String, SessionError> {
        if self.loading {
            return Err(SessionError::Busy);
        }
        let channel = raw_channel.trim();
        if channel.is_empty() {
            return Err(SessionError::EmptyChannel);
        }

        self.channel = channel.to_string();
        self.error = None;
        self.loading = true;
        tracing::info!(channel, "Emote lookup started");
        Ok(self.channel.clone())
    }

    /// Record the outcome of the lookup started by [`Session::begin_lookup`].
    pub fn finish_lookup(&mut self, outcome: Result<Vec<Emote>, EmoteError>) {
        self.loading = false;
        match outcome {
            Ok(emotes) => {
                tracing::info!(channel = %self.channel, count = emotes.len(), "Emote lookup finished");
                self.result = Some(LookupResult {
                    emotes,
                    fetched_at: Utc::now(),
                });
            }
            Err(e) => {
                tracing::warn!(channel = %self.channel, error = %e, "Emote lookup failed");
                self.error = Some(e.user_message());
                self.result = None;
            }
        }
    }

    /// End an outstanding lookup whose outcome was lost.
    ///
    /// Leaves the session ready for a new submission, with the generic error
    /// shown in place of results.
    pub fn abort_lookup(&mut self) {
        if !self.loading {
            return;
        }
        tracing::warn!(channel = %self.channel, "Emote lookup aborted");
        self.loading = false;
        self.error = Some(crate::GENERIC_ERROR_MESSAGE.to_string());
        self.result = None;
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Emotes of the last successful lookup.
    pub fn emotes(&self) -> Option<&[Emote]> {
        self.result.as_ref().map(|r| r.emotes.as_slice())
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.result.as_ref().map(|r| r.fetched_at)
    }

    /// Duplicate groups of the last result under the current toggle.
    pub fn duplicates(&self) -> DuplicateGroups {
        self.emotes()
            .map(|emotes| group_duplicates(emotes, self.case_sensitive))
            .unwrap_or_default()
    }

    /// Whether results (or the "no duplicates" notice) should be displayed.
    pub fn shows_results(&self) -> bool {
        !self.loading && self.error.is_none() && !self.channel.is_empty() && self.result.is_some()
    }
}
