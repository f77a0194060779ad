//! TOML-based configuration for the agent.
//!
//! Read from the platform-appropriate config file, or from the path given
//! with `--config`:
//! - Linux:    `~/.config/wifi-opener/config.toml`
//! - macOS:    `~/Library/Application Support/wifi-opener/config.toml`
//! - Windows:  `%APPDATA%\wifi-opener\config.toml`
//!
//! ```toml
//! [agent]
//! log_level = "info"
//! poll_interval_ms = 500
//!
//! [wifi]
//! interface_prefix = "en"
//!
//! [storage]
//! preferences_file = "/home/me/.config/wifi-opener/preferences.json"
//! log_file = "/home/me/Documents/openURLLogs.txt"
//! ```
//!
//! Every field is optional.  A missing file, section or key falls back to the
//! built-in default, so the agent runs unconfigured on first launch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::wifi::default_wireless_prefix;

/// Shortest accepted poll period.  Anything lower only burns CPU on process
/// spawns.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level agent configuration stored on disk.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub wifi: WifiSection,
    #[serde(default)]
    pub storage: StorageSection,
}

/// General agent behaviour.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AgentSection {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// How often the Wi-Fi state is sampled, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Interface selection.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WifiSection {
    /// BSD/kernel name prefix identifying Wi-Fi adapters.  Platform default
    /// when absent.
    #[serde(default)]
    pub interface_prefix: Option<String>,
}

/// File location overrides.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StorageSection {
    #[serde(default)]
    pub preferences_file: Option<PathBuf>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_poll_interval_ms() -> u64 {
    500
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl AgentConfig {
    /// Poll period, clamped to [`MIN_POLL_INTERVAL_MS`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.agent.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Configured interface prefix, or the platform default.
    pub fn interface_prefix(&self) -> String {
        self.wifi
            .interface_prefix
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| default_wireless_prefix().to_string())
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for agent files.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AgentConfig` from `path` (or the default location), returning
/// `AgentConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<AgentConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AgentConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Resolves the platform config base directory including the `wifi-opener`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("wifi-opener"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("wifi-opener"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("wifi-opener")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
