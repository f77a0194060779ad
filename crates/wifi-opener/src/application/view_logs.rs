//! View-logs use case: open the event log file in its default application.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use super::dispatch_rule::{EventLogError, EventLogSink, OpenError, UrlOpener};
use super::notify::Notice;

#[derive(Debug, Error)]
pub enum ViewLogsError {
    #[error("cannot locate event log: {0}")]
    Locate(#[from] EventLogError),

    #[error("no log file at {0}")]
    NoLogFile(PathBuf),

    #[error("failed to open log file: {0}")]
    Open(#[from] OpenError),
}

impl ViewLogsError {
    /// The notice shown to the user for this error.
    pub fn notice(&self) -> Notice {
        match self {
            ViewLogsError::Locate(_) => Notice::no_documents_dir(),
            ViewLogsError::NoLogFile(_) => Notice::no_log_file(),
            ViewLogsError::Open(e) => Notice::new("Cannot open log file", e.to_string()),
        }
    }
}

/// Opens the event log file and returns its path.
///
/// # Errors
///
/// Returns [`ViewLogsError`] if the documents directory cannot be resolved,
/// the file has not been created yet, or the OS refuses to open it.
pub fn view_logs(
    event_log: &dyn EventLogSink,
    opener: &dyn UrlOpener,
) -> Result<PathBuf, ViewLogsError> {
    let path = event_log.log_path()?;
    if !path.is_file() {
        return Err(ViewLogsError::NoLogFile(path));
    }
    info!("opening event log {}", path.display());
    opener.open_path(&path)?;
    Ok(path)
}
