//! Draft builders for everything the client submits.
//!
//! A draft is the in-memory form state of one create/submit action: labels
//! and contributors as [`TagList`]s, material/product rules as
//! [`PatternList`]s, plus the scalar fields. Payload assembly lives on the
//! draft types so the wire shape is produced in exactly one place.
//!
//! Editing contract shared by both list types:
//! - input is trimmed; empty or whitespace-only input is silently ignored
//! - an entry whose text is already present is silently ignored (for
//!   patterns the rule tag is *not* part of the key — the text alone is)
//! - removal deletes the first match and is a no-op when absent
//! - iteration order is insertion order

pub mod issue;
pub mod project;
pub mod submission;

pub use issue::IssueDraft;
pub use project::ProjectDraft;
pub use submission::{FileEntry, SubmissionDraft};

use crate::models::RuleType;

/// An ordered, de-duplicated list of free-text tags (labels, contributors).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    items: Vec<String>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` unless it is blank or already present. Returns whether
    /// the list changed.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.items.iter().any(|t| t == text) {
            return false;
        }
        self.items.push(text.to_string());
        true
    }

    /// Remove the first entry equal to `text`. Returns whether the list
    /// changed.
    pub fn remove(&mut self, text: &str) -> bool {
        match self.items.iter().position(|t| t == text) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl From<Vec<String>> for TagList {
    fn from(items: Vec<String>) -> Self {
        let mut list = Self::new();
        for item in items {
            list.add(&item);
        }
        list
    }
}

/// An ordered list of `(rule, pattern)` entries for expected materials or
/// products. The dedup key is the pattern text only, so a pattern cannot be
/// listed twice even under different rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternList {
    entries: Vec<(RuleType, String)>,
}

impl PatternList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `(rule, pattern)` unless the pattern is blank or its text is
    /// already present under any rule. Returns whether the list changed.
    pub fn add(&mut self, rule: RuleType, pattern: &str) -> bool {
        let pattern = pattern.trim();
        if pattern.is_empty() || self.entries.iter().any(|(_, p)| p == pattern) {
            return false;
        }
        self.entries.push((rule, pattern.to_string()));
        true
    }

    /// Remove the first entry whose pattern text equals `pattern`. Returns
    /// whether the list changed.
    pub fn remove(&mut self, pattern: &str) -> bool {
        match self.entries.iter().position(|(_, p)| p == pattern) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[(RuleType, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn into_entries(self) -> Vec<(RuleType, String)> {
        self.entries
    }
}

/// Split a raw command line into tokens the way the issue form did: on
/// whitespace, dropping empty tokens.
pub fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
