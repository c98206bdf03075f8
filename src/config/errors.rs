use std::path::PathBuf;

/// Loading or saving `config.toml` / `secrets.toml` went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No config directory is available for this user")]
    NoConfigDir,
    #[error("Could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not valid TOML: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Could not encode settings for {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// `inference.endpoint` does not parse as a URL.
    #[error("Inference endpoint {endpoint:?} is not a valid URL: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
}
