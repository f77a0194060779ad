//! NetworkWatcher: samples the current SSID and reports transitions.
//!
//! This use case sits at the application layer and delegates the OS query to
//! a [`WifiInterfaceSource`] trait object.  The platform-specific sources are
//! in the infrastructure layer.
//!
//! # Polling model
//!
//! There is no portable "Wi-Fi changed" notification, so the watcher simply
//! asks the OS on a fixed period (500 ms by default).  Each sample is passed
//! through an [`SsidTracker`]; only samples that differ from the last-seen
//! value become [`WatchEvent::SsidChanged`] events.  A failed OS query counts
//! as "no network" and the next tick tries again.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use wifi_opener_core::{select_ssid, InterfaceReading, SsidTracker};

/// Default sampling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Error type for interface queries.
#[derive(Debug, Error)]
pub enum WifiError {
    /// The helper command could not be started (missing binary, permissions).
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The helper command ran but reported failure.
    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: &'static str,
        status: String,
        stderr: String,
    },

    #[error("platform error: {0}")]
    Platform(String),
}

/// OS-facing source of network interface readings.
pub trait WifiInterfaceSource: Send + Sync {
    /// Returns one reading per network interface, in OS order.
    ///
    /// # Errors
    ///
    /// Returns [`WifiError`] if the interface list cannot be queried.  The
    /// watcher treats any error as "no SSID".
    fn interfaces(&self) -> Result<Vec<InterfaceReading>, WifiError>;
}

/// Events produced by the watcher task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The joined network changed.  `None` means no Wi-Fi network.
    SsidChanged(Option<String>),
}

/// The Network Watcher use case.
pub struct NetworkWatcher {
    source: Arc<dyn WifiInterfaceSource>,
    wireless_prefix: String,
    tracker: SsidTracker,
}

impl NetworkWatcher {
    /// Creates a watcher over `source` that considers interfaces whose name
    /// starts with `wireless_prefix` to be Wi-Fi adapters.
    pub fn new(source: Arc<dyn WifiInterfaceSource>, wireless_prefix: impl Into<String>) -> Self {
        Self {
            source,
            wireless_prefix: wireless_prefix.into(),
            tracker: SsidTracker::new(),
        }
    }

    /// Reads the current SSID.  Query failures yield `None`.
    pub fn current_ssid(&self) -> Option<String> {
        match self.source.interfaces() {
            Ok(readings) => select_ssid(&readings, &self.wireless_prefix),
            Err(e) => {
                debug!("interface query failed, treating as no network: {e}");
                None
            }
        }
    }

    /// Takes one sample.  Returns `Some(new_value)` on a transition and
    /// `None` when the sample repeats the last-seen value.
    pub fn poll(&mut self) -> Option<Option<String>> {
        let current = self.current_ssid();
        self.tracker.observe(current)
    }

    /// Takes one sample and invokes `on_change` if it is a transition.
    pub fn poll_with<F>(&mut self, mut on_change: F)
    where
        F: FnMut(Option<&str>),
    {
        if let Some(change) = self.poll() {
            on_change(change.as_deref());
        }
    }

    /// The last-seen SSID.
    pub fn last_seen(&self) -> Option<&str> {
        self.tracker.previous()
    }

    /// Samples every `period` and forwards transitions to `events` until
    /// `running` is cleared or the receiver is dropped.
    ///
    /// Missed ticks are skipped rather than bursted: a late sample is as good
    /// as several.
    pub async fn run(
        mut self,
        period: Duration,
        events: mpsc::Sender<WatchEvent>,
        running: Arc<AtomicBool>,
    ) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("network watcher started ({} ms period)", period.as_millis());

        loop {
            interval.tick().await;
            if !running.load(Ordering::Relaxed) {
                break;
            }
            if let Some(change) = self.poll() {
                debug!("SSID changed to {change:?}");
                if events.send(WatchEvent::SsidChanged(change)).await.is_err() {
                    break;
                }
            }
        }

        info!("network watcher stopped");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
