use std::{
    path::Path,
    sync::{Mutex, MutexGuard, OnceLock},
};

use zeroshot::app_dirs::CONFIG_HOME_ENV;
use zeroshot::config::API_TOKEN_ENV;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app directory at a temp folder and clears the token variable
/// for the lifetime of the guard.
pub struct ZeroshotEnvGuard {
    previous_home: Option<String>,
    previous_token: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl ZeroshotEnvGuard {
    pub fn set_config_home(path: &Path) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_token = std::env::var(API_TOKEN_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(API_TOKEN_ENV);
        }
        Self {
            previous_home,
            previous_token,
            _lock: lock,
        }
    }

    pub fn set_api_token(&self, token: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(API_TOKEN_ENV, token);
        }
    }
}

impl Drop for ZeroshotEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_ENV, self.previous_home.take());
        restore(API_TOKEN_ENV, self.previous_token.take());
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: called from `Drop` while the global env lock is still held.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
