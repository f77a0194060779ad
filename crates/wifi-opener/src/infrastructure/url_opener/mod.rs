//! Platform-specific URL launching.
//!
//! Two black-box operations are needed from the OS: "is there an application
//! for this URL?" and "open this URL".  Both are behind
//! [`UrlOpener`](crate::application::dispatch_rule::UrlOpener).
//!
//! | Module  | OS          | Handler lookup                           | Launch          |
//! |---------|-------------|------------------------------------------|-----------------|
//! | `macos` | macOS       | `LSCopyDefaultApplicationURLForURL`      | `/usr/bin/open` |
//! | `xdg`   | Linux etc.  | `xdg-mime query default x-scheme-handler`| `xdg-open`      |
//!
//! The selected implementation is re-exported as `NativeUrlOpener`.

use std::ffi::OsStr;
use std::process::Command;

use crate::application::dispatch_rule::OpenError;

pub mod mock;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosUrlOpener as NativeUrlOpener;

#[cfg(not(target_os = "macos"))]
pub mod xdg;

#[cfg(not(target_os = "macos"))]
pub use xdg::XdgUrlOpener as NativeUrlOpener;

/// Runs `program target` and waits for it to hand off to the handler.
///
/// # Errors
///
/// Returns [`OpenError::Spawn`] if the launcher cannot be started and
/// [`OpenError::CommandFailed`] if it exits unsuccessfully.
pub(crate) fn launch(program: &'static str, target: &OsStr) -> Result<(), OpenError> {
    let status = Command::new(program)
        .arg(target)
        .status()
        .map_err(|source| OpenError::Spawn {
            command: program,
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(OpenError::CommandFailed {
            command: program,
            status: status.to_string(),
        })
    }
}
