use std::collections::HashSet;

/// Ordered phrases selected for one submission.
///
/// Entries are non-empty and unique, in first-occurrence order, and never
/// exceed the cap that was active when the batch was built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineBatch(Vec<String>);

impl LineBatch {
    /// Phrases in submission order.
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a LineBatch {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Informational notice raised when the batch cap dropped some phrases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TruncationNotice {
    /// Phrases that will be classified.
    pub kept: usize,
    /// Distinct non-empty phrases that were entered.
    pub entered: usize,
}

impl TruncationNotice {
    pub fn message(&self) -> String {
        format!(
            "Only the first {} phrases will be classified ({} entered). Use your own API key to classify more.",
            self.kept, self.entered
        )
    }
}

/// Result of normalizing raw phrase text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    pub batch: LineBatch,
    /// Distinct non-empty lines seen before the cap was applied.
    pub distinct_lines: usize,
}

impl NormalizedBatch {
    pub fn truncation(&self) -> Option<TruncationNotice> {
        (self.distinct_lines > self.batch.len()).then(|| TruncationNotice {
            kept: self.batch.len(),
            entered: self.distinct_lines,
        })
    }
}

/// Split raw text on `'\n'`, drop duplicates and empty lines, then apply the cap.
///
/// Lines are compared verbatim: surrounding whitespace and a trailing `'\r'`
/// are part of the phrase.
pub fn normalize_lines(raw: &str, max_lines: Option<usize>) -> NormalizedBatch {
    let mut seen = HashSet::new();
    let mut lines: Vec<String> = raw
        .split('\n')
        .filter(|line| seen.insert(*line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    let distinct_lines = lines.len();
    if let Some(max) = max_lines {
        lines.truncate(max);
    }
    NormalizedBatch {
        batch: LineBatch(lines),
        distinct_lines,
    }
}
