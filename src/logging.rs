//! Tracing setup: stdout plus one timestamped log file per launch.
//!
//! Log files live under `.zeroshot/logs` and only the newest
//! [`MAX_LOG_FILES`] are kept. Request bodies and credentials are never
//! logged by this crate.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Log files retained across launches.
pub const MAX_LOG_FILES: usize = 10;
const FILE_PREFIX: &str = "zeroshot";
// The HTTP client is chatty at info level.
const DEFAULT_DIRECTIVES: &str = "info,ureq=warn,rustls=warn";

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Directory(#[from] AppDirError),
    #[error("Failed to format log file timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Failed to prepare log file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to prune old logs in {dir}: {source}")]
    Prune {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Tracing subscriber already installed: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Repeated calls are no-ops.
///
/// Callers should report the error and continue; the app runs fine without logs.
pub fn init() -> Result<(), LoggingError> {
    if GUARD.get().is_some() {
        return Ok(());
    }
    let dir = app_dirs::logs_dir()?;
    let file_name = log_file_name(local_now())?;
    let path = create_log_file(&dir, &file_name)?;
    let removed = prune_logs(&dir, MAX_LOG_FILES)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir, &file_name,
    ));
    let timer = fmt::time::OffsetTime::new(local_offset(), display_format());
    let subscriber = Registry::default()
        .with(env_filter())
        .with(fmt::layer().with_timer(timer.clone()).with_writer(std::io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = GUARD.set(guard);

    tracing::info!(
        "zeroshot {} logging to {} ({removed} old log files removed)",
        env!("CARGO_PKG_VERSION"),
        path.display()
    );
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

fn display_format() -> BorrowedFormatItem<'static> {
    const DISPLAY: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    DISPLAY.into()
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    let stamp = now.format(format_description!(
        "[year]-[month]-[day]_[hour]-[minute]-[second]"
    ))?;
    Ok(format!("{FILE_PREFIX}_{stamp}.log"))
}

fn create_log_file(dir: &Path, file_name: &str) -> Result<PathBuf, LoggingError> {
    let path = dir.join(file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::File {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Delete the oldest `*.log` files beyond `keep`. Returns how many were removed.
fn prune_logs(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let prune_err = |source| LoggingError::Prune {
        dir: dir.to_path_buf(),
        source,
    };
    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(prune_err)?.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "log") {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        if meta.is_file() {
            logs.push((meta.modified().unwrap_or(SystemTime::UNIX_EPOCH), path));
        }
    }
    if logs.len() <= keep {
        return Ok(0);
    }
    logs.sort_by(|a, b| b.0.cmp(&a.0));
    let stale = logs.split_off(keep);
    for (_, path) in &stale {
        fs::remove_file(path).map_err(prune_err)?;
    }
    Ok(stale.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn file_name_carries_prefix_and_timestamp() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            log_file_name(fixed).unwrap(),
            "zeroshot_2023-11-14_22-13-20.log"
        );
    }

    #[test]
    fn prune_removes_oldest_logs_only() {
        let dir = tempdir().unwrap();
        for idx in 0..5 {
            create_log_file(dir.path(), &format!("zeroshot_{idx}.log")).unwrap();
            thread::sleep(Duration::from_millis(15));
        }
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        assert_eq!(prune_logs(dir.path(), 3).unwrap(), 2);

        assert!(!dir.path().join("zeroshot_0.log").exists());
        assert!(!dir.path().join("zeroshot_1.log").exists());
        assert!(dir.path().join("zeroshot_2.log").exists());
        assert!(dir.path().join("zeroshot_4.log").exists());
        assert!(dir.path().join("notes.txt").exists());
        assert_eq!(prune_logs(dir.path(), 3).unwrap(), 0);
    }
}
