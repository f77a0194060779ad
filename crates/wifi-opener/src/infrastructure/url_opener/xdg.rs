//! freedesktop URL launching via `xdg-utils`.
//!
//! Handler resolution asks `xdg-mime` for the default desktop entry of the
//! `x-scheme-handler/<scheme>` MIME type; an empty answer means nothing is
//! registered.  `file:` URLs are always considered openable because
//! `xdg-open` resolves them by the file's own MIME type.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;
use wifi_opener_core::parse_url;

use super::launch;
use crate::application::dispatch_rule::{OpenError, UrlOpener};

const XDG_OPEN: &str = "xdg-open";
const XDG_MIME: &str = "xdg-mime";

#[derive(Debug, Default)]
pub struct XdgUrlOpener;

impl XdgUrlOpener {
    pub fn new() -> Self {
        Self
    }
}

impl UrlOpener for XdgUrlOpener {
    fn can_open(&self, url: &str) -> bool {
        let Ok(parsed) = parse_url(url) else {
            return false;
        };
        let scheme = parsed.scheme();
        if scheme == "file" {
            return true;
        }

        let mime = format!("x-scheme-handler/{scheme}");
        match Command::new(XDG_MIME).args(["query", "default", mime.as_str()]).output() {
            Ok(output) if output.status.success() => {
                let handler = String::from_utf8_lossy(&output.stdout);
                debug!("default handler for {mime}: {:?}", handler.trim());
                !handler.trim().is_empty()
            }
            Ok(output) => {
                debug!("{XDG_MIME} exited with {}", output.status);
                false
            }
            Err(e) => {
                debug!("failed to run {XDG_MIME}: {e}");
                false
            }
        }
    }

    fn open(&self, url: &str) -> Result<(), OpenError> {
        launch(XDG_OPEN, OsStr::new(url))
    }

    fn open_path(&self, path: &Path) -> Result<(), OpenError> {
        launch(XDG_OPEN, path.as_os_str())
    }
}
