//! Replace files without ever leaving a half-written target behind.
//!
//! Data goes to a randomly named sibling first, is flushed to disk, and is
//! then renamed over the destination. Config saves and CSV exports both go
//! through [`atomic_write`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand::TryRngCore;

const NAME_COLLISION_RETRIES: usize = 5;

pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        ));
    };
    let (staged, mut file) = TempSibling::create(dir, &file_name.to_string_lossy())?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    staged.persist(path)?;
    sync_dir(dir)
}

/// Temp file that deletes itself unless persisted.
struct TempSibling {
    path: PathBuf,
    persisted: bool,
}

impl TempSibling {
    fn create(dir: &Path, base_name: &str) -> io::Result<(Self, File)> {
        let mut attempts = 0;
        loop {
            let path = dir.join(format!(".{base_name}.{}.partial", random_suffix()?));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    let staged = Self {
                        path,
                        persisted: false,
                    };
                    return Ok((staged, file));
                }
                Err(err)
                    if err.kind() == io::ErrorKind::AlreadyExists
                        && attempts < NAME_COLLISION_RETRIES =>
                {
                    attempts += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn persist(mut self, target: &Path) -> io::Result<()> {
        rename_over(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempSibling {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn random_suffix() -> io::Result<String> {
    let mut bytes = [0u8; 6];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(io::Error::other)?;
    Ok(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
}

#[cfg(not(target_os = "windows"))]
fn rename_over(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
}

// Renaming onto an open or read-only file can fail on Windows; retry once
// after removing the old target.
#[cfg(target_os = "windows")]
fn rename_over(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
            ) =>
        {
            match fs::remove_file(to) {
                Err(inner) if inner.kind() != io::ErrorKind::NotFound => Err(inner),
                _ => fs::rename(from, to),
            }
        }
        other => other,
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn overwrites_target_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "old").unwrap();

        atomic_write(&path, b"new contents").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new contents");
        assert_eq!(entries(dir.path()), vec!["results.csv".to_string()]);
    }

    #[test]
    fn creates_missing_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        atomic_write(&path, b"a = 1\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = 1\n");
    }

    #[test]
    fn missing_parent_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(atomic_write(&path, b"x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn failed_rename_removes_partial_file() {
        let dir = tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        let target = dir.path().join("busy");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), "x").unwrap();

        assert!(atomic_write(&target, b"data").is_err());
        assert_eq!(entries(dir.path()), vec!["busy".to_string()]);
    }
}
