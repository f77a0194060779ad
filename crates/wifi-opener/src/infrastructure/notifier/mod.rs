//! User notice presentation.
//!
//! The menu-bar app shows problems as alerts.  [`DesktopNotifier`] does the
//! closest native equivalent: an `osascript` alert on macOS and a
//! `notify-send` bubble elsewhere.  The alert process is spawned and reaped
//! on a helper thread so a dialog waiting for the user never stalls the
//! watcher.  Every notice is also written to the tracing log, which is all
//! [`LogNotifier`] does (headless runs, CLI subcommands).

use std::process::Command;

use tracing::{debug, warn};

use crate::application::notify::{Notice, UserNotifier};

pub mod mock;

/// Notifier that only logs.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn alert(&self, notice: &Notice) {
        warn!("{}: {}", notice.title, notice.message);
    }
}

/// Notifier that shows a desktop alert and logs it.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl UserNotifier for DesktopNotifier {
    fn alert(&self, notice: &Notice) {
        LogNotifier.alert(notice);

        let mut command = alert_command(notice);
        match command.spawn() {
            Ok(mut child) => {
                std::thread::spawn(move || {
                    if let Err(e) = child.wait() {
                        debug!("alert process wait failed: {e}");
                    }
                });
            }
            Err(e) => debug!("could not show desktop alert: {e}"),
        }
    }
}

/// Builds the platform alert command.  Title and message are passed as
/// arguments, never spliced into a script, so no quoting is needed.
fn alert_command(notice: &Notice) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("/usr/bin/osascript");
        command
            .args([
                "-e",
                "on run argv",
                "-e",
                "display alert (item 1 of argv) message (item 2 of argv)",
                "-e",
                "end run",
            ])
            .arg(&notice.title)
            .arg(&notice.message);
        command
    }

    #[cfg(not(target_os = "macos"))]
    {
        let mut command = Command::new("notify-send");
        command
            .args(["--app-name", "wifi-opener"])
            .arg(&notice.title)
            .arg(&notice.message);
        command
    }
}
