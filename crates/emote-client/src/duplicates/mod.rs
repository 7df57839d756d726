//! Duplicate emote detection.
//!
//! Emotes are bucketed by their normalized code. The first code seen under a
//! key labels the bucket, so a case-insensitive group keeps the spelling that
//! appeared first in the channel's list.


use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::Emote;

/// Emotes whose codes collide under the active case policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Code of the first emote seen under this group's key.
    pub name: String,
    /// Members in input order, including the one that named the group.
    pub emotes: Vec<Emote>,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.emotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotes.is_empty()
    }

    /// Distinct original codes in first-seen order.
    pub fn variations(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for emote in &self.emotes {
            if !out.contains(&emote.code.as_str()) {
                out.push(&emote.code);
            }
        }
        out
    }
}

/// Summary numbers shown above the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateStats {
    /// Number of group names that have duplicates.
    pub names_with_duplicates: usize,
    /// Sum of the member counts over all groups.
    pub total_duplicates: usize,
}

/// Ordered mapping from group name to colliding emotes.
///
/// Groups appear in the order their name was first seen in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateGroups {
    groups: Vec<DuplicateGroup>,
}

impl DuplicateGroups {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a group by its name.
    pub fn get(&self, name: &str) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn stats(&self) -> DuplicateStats {
        DuplicateStats {
            names_with_duplicates: self.groups.len(),
            total_duplicates: self.groups.iter().map(DuplicateGroup::len).sum(),
        }
    }
}

impl IntoIterator for DuplicateGroups {
    type Item = DuplicateGroup;
    type IntoIter = std::vec::IntoIter<DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a DuplicateGroups {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

fn normalize(code: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(code)
    } else {
        Cow::Owned(code.to_lowercase())
    }
}

/// Bucket every emote by normalized code, singletons included.
///
/// Each input emote lands in exactly one bucket.
pub fn partition(emotes: &[Emote], case_sensitive: bool) -> Vec<DuplicateGroup> {
    let mut index: HashMap<Cow<'_, str>, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for emote in emotes {
        let key = normalize(&emote.code, case_sensitive);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(DuplicateGroup {
                name: emote.code.clone(),
                emotes: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].emotes.push(emote.clone());
    }

    groups
}

/// Group emotes by code and keep only the groups with more than one member.
pub fn group_duplicates(emotes: &[Emote], case_sensitive: bool) -> DuplicateGroups {
    let mut groups = partition(emotes, case_sensitive);
    groups.retain(|g| g.len() > 1);

    tracing::debug!(
        emotes = emotes.len(),
        groups = groups.len(),
        case_sensitive,
        "Grouped duplicate emotes"
    );

    DuplicateGroups { groups }
}
