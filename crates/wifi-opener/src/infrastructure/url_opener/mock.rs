//! Recording URL opener for unit testing.
//!
//! Never launches anything.  A URL is "openable" when its scheme is in the
//! accepted list; every query and every open is recorded so tests can assert
//! on exactly what would have reached the OS.
//!
//! Set `should_fail = true` to make `open`/`open_path` return an error.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use wifi_opener_core::parse_url;

use crate::application::dispatch_rule::{OpenError, UrlOpener};

#[derive(Default)]
pub struct MockUrlOpener {
    /// Schemes (lowercase) that have a registered handler.
    pub schemes: Vec<String>,
    /// URLs passed to `can_open`.
    pub queried: Mutex<Vec<String>>,
    /// URLs passed to `open`.
    pub opened: Mutex<Vec<String>>,
    /// Paths passed to `open_path`.
    pub opened_paths: Mutex<Vec<PathBuf>>,
    pub should_fail: bool,
}

impl MockUrlOpener {
    pub fn new(schemes: &[&str]) -> Self {
        Self {
            schemes: schemes.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Handlers for `http`, `https`, `mailto` and `file`.
    pub fn accepting_web() -> Self {
        Self::new(&["http", "https", "mailto", "file"])
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn opened_paths(&self) -> Vec<PathBuf> {
        self.opened_paths.lock().unwrap().clone()
    }
}

impl UrlOpener for MockUrlOpener {
    fn can_open(&self, url: &str) -> bool {
        self.queried.lock().unwrap().push(url.to_string());
        parse_url(url)
            .map(|parsed| self.schemes.iter().any(|s| s.eq_ignore_ascii_case(parsed.scheme())))
            .unwrap_or(false)
    }

    fn open(&self, url: &str) -> Result<(), OpenError> {
        if self.should_fail {
            return Err(OpenError::Platform("mock failure".into()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn open_path(&self, path: &Path) -> Result<(), OpenError> {
        if self.should_fail {
            return Err(OpenError::Platform("mock failure".into()));
        }
        self.opened_paths.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
