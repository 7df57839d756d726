use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Session;
use crate::duplicates::{DuplicateGroup, DuplicateStats};
use crate::models::Emote;

/// One emote card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmoteView {
    pub code: String,
    pub provider: Option<i64>,
    pub provider_name: &'static str,
    pub badge: &'static str,
    pub animated: bool,
    pub zero_width: bool,
    pub image_url: Option<String>,
}

impl From<&Emote> for EmoteView {
    fn from(emote: &Emote) -> Self {
        Self {
            code: emote.code.clone(),
            provider: emote.provider.code(),
            provider_name: emote.provider.name(),
            badge: emote.provider.badge(),
            animated: emote.animated,
            zero_width: emote.zero_width,
            image_url: emote.best_image_url().map(str::to_string),
        }
    }
}

/// One duplicate group card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub name: String,
    pub count: usize,
    /// Distinct spellings; only filled for case-insensitive matching when
    /// more than one spelling exists.
    pub variations: Vec<String>,
    pub emotes: Vec<EmoteView>,
}

impl GroupView {
    fn new(group: &DuplicateGroup, case_sensitive: bool) -> Self {
        let variations = group.variations();
        let variations = if !case_sensitive && variations.len() > 1 {
            variations.into_iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        Self {
            name: group.name.clone(),
            count: group.len(),
            variations,
            emotes: group.emotes.iter().map(EmoteView::from).collect(),
        }
    }
}

/// Snapshot of a session as rendered by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub channel: String,
    pub case_sensitive: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub emote_count: usize,
    pub stats: DuplicateStats,
    pub no_duplicates: bool,
    pub groups: Vec<GroupView>,
}

impl Session {
    pub fn view(&self) -> SessionView {
        let (groups, stats) = if self.shows_results() {
            let duplicates = self.duplicates();
            let groups = duplicates
                .iter()
                .map(|g| GroupView::new(g, self.case_sensitive))
                .collect();
            (groups, duplicates.stats())
        } else {
            (Vec::new(), DuplicateStats::default())
        };

        SessionView {
            channel: self.channel.clone(),
            case_sensitive: self.case_sensitive,
            loading: self.loading,
            error: self.error.clone(),
            fetched_at: self.fetched_at(),
            emote_count: self.emotes().map_or(0, <[Emote]>::len),
            stats,
            no_duplicates: self.shows_results() && groups.is_empty(),
            groups,
        }
    }
}
