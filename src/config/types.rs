use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;
use super::defaults::{
    clamp_max_tags, clamp_shared_max_lines, default_endpoint, default_export_encoding,
    default_export_file_name, default_export_mime, default_label_suggestions, default_labels,
    default_labels_header, default_max_tags, default_sample_phrases, default_scores_header,
    default_shared_max_lines, default_text_header, default_token_help_url,
};

/// Settings loaded from `config.toml`.
///
/// Config sections: `inference`, `form`, `export`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub inference: InferenceSettings,
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

impl AppConfig {
    pub(crate) fn normalized(mut self) -> Self {
        self.inference.shared_max_lines = clamp_shared_max_lines(self.inference.shared_max_lines);
        self.form.max_tags = clamp_max_tags(self.form.max_tags);
        self
    }
}

/// Remote endpoint and shared-mode limits.
///
/// Config keys: `endpoint`, `shared_max_lines`, `token_help_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Phrases classified per submission when using the shared key.
    #[serde(default = "default_shared_max_lines")]
    pub shared_max_lines: usize,
    /// Page where users can create their own API token.
    #[serde(default = "default_token_help_url")]
    pub token_help_url: String,
}

impl InferenceSettings {
    /// Parse the endpoint into a URL usable by the HTTP client.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.endpoint.trim()).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            shared_max_lines: default_shared_max_lines(),
            token_help_url: default_token_help_url(),
        }
    }
}

/// Form presets.
///
/// Config keys: `default_labels`, `label_suggestions`, `max_tags`, `sample_phrases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default = "default_labels")]
    pub default_labels: Vec<String>,
    #[serde(default = "default_label_suggestions")]
    pub label_suggestions: Vec<String>,
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,
    #[serde(default = "default_sample_phrases")]
    pub sample_phrases: Vec<String>,
}

impl FormSettings {
    /// Sample phrases joined one per line, as prefilled in the phrase box.
    pub fn sample_text(&self) -> String {
        self.sample_phrases.join("\n")
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            default_labels: default_labels(),
            label_suggestions: default_label_suggestions(),
            max_tags: default_max_tags(),
            sample_phrases: default_sample_phrases(),
        }
    }
}

/// CSV export options.
///
/// Config keys: `file_name`, `encoding`, `mime`, `headers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
    /// WHATWG encoding label, resolved through `encoding_rs`.
    #[serde(default = "default_export_encoding")]
    pub encoding: String,
    #[serde(default = "default_export_mime")]
    pub mime: String,
    #[serde(default)]
    pub headers: ExportHeaders,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
            encoding: default_export_encoding(),
            mime: default_export_mime(),
            headers: ExportHeaders::default(),
        }
    }
}

/// Column headers written to exported CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportHeaders {
    #[serde(default = "default_text_header")]
    pub text: String,
    #[serde(default = "default_labels_header")]
    pub labels: String,
    #[serde(default = "default_scores_header")]
    pub scores: String,
}

impl Default for ExportHeaders {
    fn default() -> Self {
        Self {
            text: default_text_header(),
            labels: default_labels_header(),
            scores: default_scores_header(),
        }
    }
}
