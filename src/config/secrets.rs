use std::path::Path;

use serde::Deserialize;

use crate::app_dirs;

use super::{ConfigError, map_app_dir_error};

/// Secrets file name under the `.zeroshot` root.
pub const SECRETS_FILE_NAME: &str = "secrets.toml";
/// Environment variable that supplies the shared token, taking precedence over the file.
pub const API_TOKEN_ENV: &str = "ZEROSHOT_API_TOKEN";

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "API_TOKEN", default)]
    api_token: Option<String>,
}

/// Resolve the shared-mode API token. `None` when nothing is provisioned.
pub fn load_shared_token() -> Result<Option<String>, ConfigError> {
    if let Some(token) = std::env::var(API_TOKEN_ENV).ok().and_then(non_blank) {
        return Ok(Some(token));
    }
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    read_token_file(&dir.join(SECRETS_FILE_NAME))
}

/// Read `API_TOKEN` from a secrets file. A missing file or key yields `None`.
pub fn read_token_file(path: &Path) -> Result<Option<String>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let secrets: SecretsFile = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(secrets.api_token.and_then(non_blank))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
