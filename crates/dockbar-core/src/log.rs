//! File logger for the bar daemon.
//!
//! Writes to `~/.config/dockbar/logs/dockbar.log`. Once the file grows
//! past the configured size it is moved to `dockbar.log.1` and a fresh
//! file is started.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<FileLog>> = OnceLock::new();

const LOG_FILE_NAME: &str = "dockbar.log";

/// `[logging]` section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Off unless asked for.
    pub enabled: bool,
    /// Minimum level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Size in megabytes at which the log is rotated. 0 disables rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 5,
        }
    }
}

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parses a level name. Unknown names mean `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

struct FileLog {
    file: File,
    path: PathBuf,
    min_level: Level,
    limit: u64,
    size: u64,
}

impl FileLog {
    fn open(path: PathBuf, config: &LogConfig) -> std::io::Result<Self> {
        let file = append(&path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            min_level: Level::from_name(&config.level),
            limit: config.max_file_mb * 1024 * 1024,
            size,
        })
    }

    fn write_line(&mut self, line: &str) {
        if self.file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.size += line.len() as u64;
        if self.limit > 0 && self.size >= self.limit {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let backup = backup_path(&self.path);
        let _ = fs::rename(&self.path, &backup);
        if let Ok(file) = append(&self.path) {
            self.file = file;
            self.size = 0;
        }
    }
}

fn append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

/// Starts file logging. Call once, early in the daemon.
///
/// Does nothing when logging is disabled or the log directory can't be
/// created.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    let dir = dir.join("logs");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Ok(log) = FileLog::open(dir.join(LOG_FILE_NAME), config) {
        let _ = LOGGER.set(Mutex::new(log));
    }
}

/// Writes one line if `level` passes the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(lock) = LOGGER.get() else {
        return;
    };
    let Ok(mut log) = lock.lock() else {
        return;
    };
    if level < log.min_level {
        return;
    }
    let line = format!("{} [{}] {args}\n", clock_time(), level.label());
    log.write_line(&line);
}

/// UTC time of day with milliseconds.
fn clock_time() -> String {
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(Level::from_name("DEBUG"), Level::Debug);
        assert_eq!(Level::from_name(" warn "), Level::Warn);
        assert_eq!(Level::from_name("error"), Level::Error);
        assert_eq!(Level::from_name("nonsense"), Level::Info);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn backup_appends_suffix() {
        let path = PathBuf::from("logs").join("dockbar.log");
        assert_eq!(backup_path(&path), PathBuf::from("logs").join("dockbar.log.1"));
    }

    #[test]
    fn writing_without_init_is_a_no_op() {
        write(Level::Error, format_args!("dropped"));
    }
}
