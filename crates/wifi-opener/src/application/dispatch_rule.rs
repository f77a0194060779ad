//! RuleEngine: turns a network change into a URL open.
//!
//! ```text
//! ssid ─> RuleSet::find_match ─┬─ none ──────────────> NoMatch
//!                              └─ rule ─> validate_url ─┬─ rejected ─> notify, InvalidUrl
//!                                                       └─ ok ─> open ─> log ─> Opened
//! ```
//!
//! The pause switch is checked by the caller (`AppController`) before the
//! engine is invoked, so a paused agent never performs a lookup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use wifi_opener_core::{parse_url, Rule, RuleSet, UrlError};

use super::notify::{Notice, UserNotifier};

/// Error type for URL open operations.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}")]
    CommandFailed { command: &'static str, status: String },

    #[error("platform error: {0}")]
    Platform(String),
}

/// OS default-application resolution and launching.
pub trait UrlOpener: Send + Sync {
    /// Returns `true` if the OS knows an application that can open `url`.
    fn can_open(&self, url: &str) -> bool;

    /// Opens `url` with the OS default handler.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError`] if the handler could not be launched.
    fn open(&self, url: &str) -> Result<(), OpenError>;

    /// Opens a local file with its default application.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError`] if the handler could not be launched.
    fn open_path(&self, path: &Path) -> Result<(), OpenError>;
}

/// Error type for the event log.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("could not determine the user documents directory")]
    NoDocumentsDir,

    #[error("I/O error writing event log at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only record of URL opens.
pub trait EventLogSink: Send + Sync {
    /// Appends one `"<timestamp>: Opened <url> for WiFi <ssid>"` line.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError`] if the log file cannot be located or written.
    fn record_open(&self, ssid: &str, url: &str) -> Result<(), EventLogError>;

    /// Where the log file lives (it may not exist yet).
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::NoDocumentsDir`] if the location cannot be
    /// resolved.
    fn log_path(&self) -> Result<PathBuf, EventLogError>;
}

/// Why a URL was refused before being handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    #[error(transparent)]
    Syntax(#[from] UrlError),

    #[error("no application can open {0}")]
    NoHandler(String),
}

/// Checks that `url` parses as an absolute URL and that `opener` can
/// resolve a handler for it.
///
/// # Errors
///
/// Returns [`UrlRejection`] describing the first failed check.
pub fn validate_url(url: &str, opener: &dyn UrlOpener) -> Result<(), UrlRejection> {
    parse_url(url)?;
    if !opener.can_open(url) {
        return Err(UrlRejection::NoHandler(url.to_string()));
    }
    Ok(())
}

/// Result of handling one SSID change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Monitoring is paused; no lookup was made.
    Paused,
    /// The machine left Wi-Fi; `None` never matches.
    NoNetwork,
    /// No rule names this SSID.
    NoMatch { ssid: String },
    /// The matching rule's URL failed validation; the user was notified.
    InvalidUrl { rule: Rule, reason: UrlRejection },
    /// The OS refused to launch the handler.
    OpenFailed { rule: Rule, reason: String },
    /// The URL was opened.  `logged` is `false` if the log append failed.
    Opened { rule: Rule, logged: bool },
}

impl DispatchOutcome {
    /// `true` when a rule lookup was performed.
    pub fn attempted(&self) -> bool {
        !matches!(self, DispatchOutcome::Paused | DispatchOutcome::NoNetwork)
    }
}

/// The Rule Engine use case.
pub struct RuleEngine {
    opener: Arc<dyn UrlOpener>,
    event_log: Arc<dyn EventLogSink>,
    notifier: Arc<dyn UserNotifier>,
}

impl RuleEngine {
    pub fn new(
        opener: Arc<dyn UrlOpener>,
        event_log: Arc<dyn EventLogSink>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        Self {
            opener,
            event_log,
            notifier,
        }
    }

    /// Looks up `ssid` in `rules` and opens the first match.
    pub fn dispatch(&self, rules: &RuleSet, ssid: &str) -> DispatchOutcome {
        let Some(rule) = rules.find_match(ssid) else {
            info!("no rule for WiFi {ssid:?}");
            return DispatchOutcome::NoMatch {
                ssid: ssid.to_string(),
            };
        };

        if let Err(reason) = validate_url(&rule.url, self.opener.as_ref()) {
            warn!("rule for {ssid:?} has unusable URL {:?}: {reason}", rule.url);
            self.notifier.alert(&Notice::invalid_url(&rule.url));
            return DispatchOutcome::InvalidUrl {
                rule: rule.clone(),
                reason,
            };
        }

        info!("opening {} for WiFi {ssid:?}", rule.url);
        if let Err(e) = self.opener.open(&rule.url) {
            error!("failed to open {}: {e}", rule.url);
            return DispatchOutcome::OpenFailed {
                rule: rule.clone(),
                reason: e.to_string(),
            };
        }

        let logged = match self.event_log.record_open(ssid, &rule.url) {
            Ok(()) => true,
            Err(e) => {
                error!("failed to append event log: {e}");
                false
            }
        };

        DispatchOutcome::Opened {
            rule: rule.clone(),
            logged,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
