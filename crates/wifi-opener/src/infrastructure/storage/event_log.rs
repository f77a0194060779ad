//! Append-only event log (`openURLLogs.txt`).
//!
//! One line per successful URL open, in the [`LogEntry`] format with a UTC
//! timestamp such as `2024-05-01 08:30:00 +0000`.  The file lives in the
//! user's documents directory unless `[storage] log_file` overrides it.
//! It is created on first append and never truncated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;
use wifi_opener_core::LogEntry;

use crate::application::dispatch_rule::{EventLogError, EventLogSink};

pub const LOG_FILE_NAME: &str = "openURLLogs.txt";

/// File-backed [`EventLogSink`].
#[derive(Debug, Clone, Default)]
pub struct EventLogFile {
    override_path: Option<PathBuf>,
}

impl EventLogFile {
    /// Log in `<documents>/openURLLogs.txt`.
    pub fn in_documents() -> Self {
        Self::default()
    }

    /// Log at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    /// Uses `path` if given, the documents directory otherwise.
    pub fn with_override(path: Option<PathBuf>) -> Self {
        Self {
            override_path: path,
        }
    }

    fn append(&self, path: &Path, line: &str) -> Result<(), EventLogError> {
        let io_error = |source| EventLogError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_error)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        file.write_all(line.as_bytes()).map_err(io_error)
    }
}

impl EventLogSink for EventLogFile {
    fn record_open(&self, ssid: &str, url: &str) -> Result<(), EventLogError> {
        let path = self.log_path()?;
        let entry = LogEntry::new(format_timestamp(OffsetDateTime::now_utc()), url, ssid);
        self.append(&path, &entry.to_line())?;
        debug!("logged open of {url} to {}", path.display());
        Ok(())
    }

    fn log_path(&self) -> Result<PathBuf, EventLogError> {
        match &self.override_path {
            Some(path) => Ok(path.clone()),
            None => documents_dir()
                .map(|dir| dir.join(LOG_FILE_NAME))
                .ok_or(EventLogError::NoDocumentsDir),
        }
    }
}

/// Renders `at` as `YYYY-MM-DD HH:MM:SS +hhmm`.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
    );
    at.format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// Resolves the user's documents directory.
///
/// Linux honours `XDG_DOCUMENTS_DIR` from the environment or from
/// `user-dirs.dirs`; every platform falls back to `~/Documents`.
pub fn documents_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("USERPROFILE").map(|h| PathBuf::from(h).join("Documents"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = PathBuf::from(std::env::var_os("HOME")?);

        #[cfg(not(target_os = "macos"))]
        {
            if let Some(dir) = std::env::var_os("XDG_DOCUMENTS_DIR") {
                return Some(PathBuf::from(dir));
            }
            let config_home = std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(".config"));
            if let Ok(content) = std::fs::read_to_string(config_home.join("user-dirs.dirs")) {
                if let Some(dir) = parse_user_dirs(&content, &home) {
                    return Some(dir);
                }
            }
        }

        Some(home.join("Documents"))
    }
}

/// Extracts `XDG_DOCUMENTS_DIR` from `user-dirs.dirs` content, expanding a
/// leading `$HOME`.
pub fn parse_user_dirs(content: &str, home: &Path) -> Option<PathBuf> {
    let raw = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| line.strip_prefix("XDG_DOCUMENTS_DIR="))?
        .trim_matches('"');

    if let Some(rest) = raw.strip_prefix("$HOME") {
        let rest = rest.trim_start_matches('/');
        return Some(if rest.is_empty() {
            home.to_path_buf()
        } else {
            home.join(rest)
        });
    }
    if raw.starts_with('/') {
        return Some(PathBuf::from(raw));
    }
    None
}

pub mod mock {
    //! In-memory event log for unit testing.

    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use crate::application::dispatch_rule::{EventLogError, EventLogSink};

    /// Records `(ssid, url)` pairs.  `log_path` reports the configured
    /// location, or `NoDocumentsDir` when there is none.
    #[derive(Default)]
    pub struct MemoryEventLog {
        pub location: Option<PathBuf>,
        pub entries: Mutex<Vec<(String, String)>>,
        pub fail_writes: AtomicBool,
    }

    impl MemoryEventLog {
        pub fn new() -> Self {
            Self::default()
        }

        /// A log whose documents directory cannot be resolved.
        pub fn without_location() -> Self {
            Self::default()
        }

        pub fn at(path: PathBuf) -> Self {
            Self {
                location: Some(path),
                ..Self::default()
            }
        }

        pub fn entries(&self) -> Vec<(String, String)> {
            self.entries.lock().unwrap().clone()
        }

        pub fn fail_writes(&self) {
            self.fail_writes.store(true, Ordering::SeqCst);
        }
    }

    impl EventLogSink for MemoryEventLog {
        fn record_open(&self, ssid: &str, url: &str) -> Result<(), EventLogError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(EventLogError::Io {
                    path: PathBuf::from("memory"),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "mock write failure"),
                });
            }
            self.entries
                .lock()
                .unwrap()
                .push((ssid.to_string(), url.to_string()));
            Ok(())
        }

        fn log_path(&self) -> Result<PathBuf, EventLogError> {
            self.location.clone().ok_or(EventLogError::NoDocumentsDir)
        }
    }
}
