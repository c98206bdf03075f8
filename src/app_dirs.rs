//! Where the app keeps its files on disk.
//!
//! Everything lives in one `.zeroshot` folder: `config.toml`, `secrets.toml`
//! and `logs/`. The folder sits in the OS config directory unless
//! [`CONFIG_HOME_ENV`] names another base.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Folder created inside the config base directory.
pub const APP_DIR_NAME: &str = ".zeroshot";
/// Relocates the config base directory (portable installs and tests).
pub const CONFIG_HOME_ENV: &str = "ZEROSHOT_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, thiserror::Error)]
pub enum AppDirError {
    #[error("Could not determine a config directory for this user")]
    NoBaseDir,
    #[error("Could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The `.zeroshot` folder, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = base_dir().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(root_in(&base))
}

/// `.zeroshot/logs`, created on first use.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn base_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_HOME_ENV) {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()),
    }
}

fn root_in(base: &Path) -> PathBuf {
    base.join(APP_DIR_NAME)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}
