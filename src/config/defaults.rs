use crate::classify::DEFAULT_SHARED_MAX_LINES;
use crate::inference::DEFAULT_ENDPOINT;

pub(super) const TOKEN_HELP_URL: &str = "https://huggingface.co/settings/tokens";
pub(super) const MIN_MAX_TAGS: usize = 2;

pub(super) fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub(super) fn default_shared_max_lines() -> usize {
    DEFAULT_SHARED_MAX_LINES
}

pub(super) fn default_token_help_url() -> String {
    TOKEN_HELP_URL.to_string()
}

pub(super) fn default_labels() -> Vec<String> {
    strings(&["Positive", "Negative"])
}

pub(super) fn default_label_suggestions() -> Vec<String> {
    strings(&[
        "Informational",
        "Transactional",
        "Navigational",
        "Positive",
        "Negative",
        "Neutral",
    ])
}

pub(super) fn default_max_tags() -> usize {
    3
}

pub(super) fn default_sample_phrases() -> Vec<String> {
    strings(&["What a wonderful day!", "I lost my packet...So BAD..."])
}

pub(super) fn default_export_file_name() -> String {
    "results.csv".to_string()
}

pub(super) fn default_export_encoding() -> String {
    "gbk".to_string()
}

pub(super) fn default_export_mime() -> String {
    "text/csv".to_string()
}

pub(super) fn default_text_header() -> String {
    "文本短语".to_string()
}

pub(super) fn default_labels_header() -> String {
    "分类标签".to_string()
}

pub(super) fn default_scores_header() -> String {
    "分类指数".to_string()
}

pub(super) fn clamp_shared_max_lines(value: usize) -> usize {
    value.max(1)
}

pub(super) fn clamp_max_tags(value: usize) -> usize {
    value.max(MIN_MAX_TAGS)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
