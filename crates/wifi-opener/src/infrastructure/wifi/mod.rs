//! Platform-specific Wi-Fi interface queries.
//!
//! Produces the `(interface name, SSID)` readings the
//! [`NetworkWatcher`](crate::application::watch_network::NetworkWatcher)
//! samples on every tick.
//!
//! # Platform implementations
//!
//! Each source implements [`WifiInterfaceSource`]; the correct one is
//! selected at compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeInterfaceSource`:
//!
//! | Module         | OS         | Tool used                                          |
//! |----------------|------------|----------------------------------------------------|
//! | `networksetup` | macOS      | `networksetup -listallhardwareports` / `-getairportnetwork` |
//! | `nmcli`        | Linux etc. | `nmcli -t -f ACTIVE,DEVICE,SSID device wifi list`  |
//!
//! Both sources only spawn a command and parse its text output, so both are
//! compiled on every platform and their parsers are tested everywhere.
//!
//! A [`mock::ScriptedInterfaceSource`] replays a fixed sequence of readings
//! for tests.

use std::process::Command;

use crate::application::watch_network::WifiError;

pub mod mock;
pub mod networksetup;
pub mod nmcli;

#[cfg(target_os = "macos")]
pub use networksetup::NetworksetupSource as NativeInterfaceSource;

#[cfg(not(target_os = "macos"))]
pub use nmcli::NmcliSource as NativeInterfaceSource;

/// Interface-name prefix that identifies Wi-Fi adapters on this platform.
pub fn default_wireless_prefix() -> &'static str {
    if cfg!(target_os = "macos") {
        "en"
    } else {
        "wl"
    }
}

/// Builds the platform source.  Only `networksetup` needs the prefix; `nmcli`
/// reports Wi-Fi devices exclusively.
pub fn native_source(wireless_prefix: &str) -> NativeInterfaceSource {
    #[cfg(target_os = "macos")]
    {
        NativeInterfaceSource::new(wireless_prefix)
    }

    #[cfg(not(target_os = "macos"))]
    {
        let _ = wireless_prefix;
        NativeInterfaceSource::new()
    }
}

/// Runs `command` and returns its stdout as UTF-8 (lossy).
///
/// # Errors
///
/// Returns [`WifiError::Spawn`] if the command cannot be started and
/// [`WifiError::CommandFailed`] if it exits unsuccessfully.
pub(crate) fn run_tool(
    program: &'static str,
    args: &[&str],
) -> Result<String, WifiError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| WifiError::Spawn {
            command: program,
            source,
        })?;

    if !output.status.success() {
        return Err(WifiError::CommandFailed {
            command: program,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
