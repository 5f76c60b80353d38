//! Log file helpers: default location, size-based rotation and level
//! names.
//!
//! Subscriber installation lives in the `webpath` binary; library crates
//! only emit `tracing` events.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the log inside the log directory.
pub const LOG_FILE_NAME: &str = "webpath.log";

/// Size-based rotation policy for the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRotation {
    /// Rotate once the current file reaches this many bytes.
    pub max_size: u64,
    /// Number of rotated files (`.1` … `.max_files`) kept.
    pub max_files: u32,
}

impl Default for LogRotation {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
            max_files: 5,
        }
    }
}

impl LogRotation {
    /// Rotate `log_path` if it has grown past `max_size`.
    ///
    /// `webpath.log` → `webpath.log.1` → … → `webpath.log.<max_files>`,
    /// the oldest being removed. Missing or small files are left alone.
    pub fn rotate(&self, log_path: &Path) -> io::Result<()> {
        let len = match fs::metadata(log_path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        if len < self.max_size || self.max_files == 0 {
            return Ok(());
        }

        let oldest = rotated_path(log_path, self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for i in (1..self.max_files).rev() {
            let from = rotated_path(log_path, i);
            if from.exists() {
                fs::rename(&from, rotated_path(log_path, i + 1))?;
            }
        }
        fs::rename(log_path, rotated_path(log_path, 1))
    }
}

/// Default log file: `<data-local-dir>/webpath/webpath.log`, or the
/// system temp dir when no data dir is known.
pub fn default_log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("webpath")
        .join(LOG_FILE_NAME)
}

/// Create the parent directory of `log_path` if it is missing.
pub fn ensure_log_dir(log_path: &Path) -> io::Result<()> {
    match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Map a level name (case-insensitive) to an `EnvFilter` directive.
/// Unknown names map to `"info"`.
pub fn log_level_to_filter(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

fn rotated_path(base: &Path, index: u32) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_rotation(max_files: u32) -> LogRotation {
        LogRotation {
            max_size: 50,
            max_files,
        }
    }

    #[test]
    fn default_log_file_path_is_named_webpath() {
        let path = default_log_file_path();
        assert!(path.ends_with("webpath/webpath.log"), "got: {path:?}");
    }

    #[test]
    fn rotated_path_appends_index() {
        let base = Path::new("/tmp/webpath.log");
        assert_eq!(rotated_path(base, 1), PathBuf::from("/tmp/webpath.log.1"));
        assert_eq!(rotated_path(base, 4), PathBuf::from("/tmp/webpath.log.4"));
    }

    #[test]
    fn rotate_missing_file_is_noop() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join(LOG_FILE_NAME);
        assert!(LogRotation::default().rotate(&log).is_ok());
    }

    #[test]
    fn rotate_small_file_is_noop() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join(LOG_FILE_NAME);
        fs::write(&log, "short").unwrap();
        small_rotation(3).rotate(&log).unwrap();
        assert!(log.exists());
    }

    #[test]
    fn rotate_cascades_and_drops_oldest() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join(LOG_FILE_NAME);
        fs::write(dir.path().join("webpath.log.1"), "old1").unwrap();
        fs::write(dir.path().join("webpath.log.2"), "old2").unwrap();
        fs::write(&log, "x".repeat(100)).unwrap();

        small_rotation(2).rotate(&log).unwrap();

        assert!(!log.exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("webpath.log.1")).unwrap(),
            "x".repeat(100)
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("webpath.log.2")).unwrap(),
            "old1"
        );
        assert!(!dir.path().join("webpath.log.3").exists());
    }

    #[test]
    fn ensure_log_dir_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("a").join("b").join(LOG_FILE_NAME);
        ensure_log_dir(&log).unwrap();
        ensure_log_dir(&log).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn level_names_map_to_filters() {
        assert_eq!(log_level_to_filter("TRACE"), "trace");
        assert_eq!(log_level_to_filter("Debug"), "debug");
        assert_eq!(log_level_to_filter("warning"), "warn");
        assert_eq!(log_level_to_filter("error"), "error");
        assert_eq!(log_level_to_filter("info"), "info");
        assert_eq!(log_level_to_filter("verbose"), "info");
    }
}
