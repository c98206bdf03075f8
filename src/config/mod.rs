//! Persisted application settings and the shared API secret.

mod defaults;
mod errors;
mod io;
mod secrets;
mod types;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from_path, load_or_default, save, save_to_path};
pub use secrets::{API_TOKEN_ENV, SECRETS_FILE_NAME, load_shared_token, read_token_file};
pub use types::{AppConfig, ExportHeaders, ExportSettings, FormSettings, InferenceSettings};

use crate::app_dirs::AppDirError;

pub(crate) fn map_app_dir_error(error: AppDirError) -> ConfigError {
    match error {
        AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
