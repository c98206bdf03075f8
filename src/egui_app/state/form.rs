use crate::classify::{FormInput, TruncationNotice, normalize_lines};
use crate::config::FormSettings;

/// Editable form fields for one mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    /// Phrase box contents, one phrase per line.
    pub text: String,
    /// Tags entered so far.
    pub labels: Vec<String>,
    /// Pending text in the tag input.
    pub tag_input: String,
    /// Own API key; kept in memory only.
    pub api_key: String,
}

/// Result of trying to add a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagAddOutcome {
    Added,
    Empty,
    Duplicate,
    LimitReached,
}

impl FormState {
    pub fn with_presets(settings: &FormSettings) -> Self {
        Self {
            text: settings.sample_text(),
            labels: settings.default_labels.clone(),
            ..Self::default()
        }
    }

    /// Add a trimmed tag unless it is blank, already present or over `max_tags`.
    pub fn add_tag(&mut self, tag: &str, max_tags: usize) -> TagAddOutcome {
        let tag = tag.trim();
        if tag.is_empty() {
            return TagAddOutcome::Empty;
        }
        if self.labels.iter().any(|existing| existing == tag) {
            return TagAddOutcome::Duplicate;
        }
        if self.labels.len() >= max_tags {
            return TagAddOutcome::LimitReached;
        }
        self.labels.push(tag.to_string());
        TagAddOutcome::Added
    }

    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        (index < self.labels.len()).then(|| self.labels.remove(index))
    }

    /// Suggestions not yet used that match the pending tag input.
    pub fn suggestions<'a>(&self, candidates: &'a [String]) -> Vec<&'a str> {
        let needle = self.tag_input.trim().to_lowercase();
        candidates
            .iter()
            .filter(|candidate| !self.labels.contains(candidate))
            .filter(|candidate| needle.is_empty() || candidate.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Notice shown while typing when the cap would drop phrases.
    pub fn live_truncation(&self, max_lines: Option<usize>) -> Option<TruncationNotice> {
        let max = max_lines?;
        normalize_lines(&self.text, Some(max)).truncation()
    }

    pub fn to_input(&self) -> FormInput {
        FormInput {
            text: self.text.clone(),
            labels: self.labels.clone(),
        }
    }
}
