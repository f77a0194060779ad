//! AppController: the single owner of the agent's mutable state.
//!
//! The rule list and the pause switch are fields of this struct rather than
//! process globals.  The main event loop owns the controller and is the only
//! code that calls `&mut self` methods; the watcher task and the menu reader
//! talk to it through channels.  Everything runs on one thread, so no locks
//! are involved.
//!
//! ```text
//!  NetworkWatcher ──WatchEvent──┐
//!                               ├─> main loop ─> AppController
//!  console menu ───MenuAction───┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};
use wifi_opener_core::{PauseState, Rule, RuleSet};

use super::dispatch_rule::{DispatchOutcome, EventLogSink, RuleEngine, UrlOpener};
use super::manage_rules::{
    append_rule, load_rules, refresh_rules, validate_new_rule, AddRuleError, RuleRepository,
};
use super::notify::UserNotifier;
use super::view_logs::{view_logs, ViewLogsError};

/// OS-facing collaborators injected into the controller.
#[derive(Clone)]
pub struct Collaborators {
    pub repository: Arc<dyn RuleRepository>,
    pub opener: Arc<dyn UrlOpener>,
    pub event_log: Arc<dyn EventLogSink>,
    pub notifier: Arc<dyn UserNotifier>,
}

pub struct AppController {
    rules: RuleSet,
    pause: PauseState,
    engine: RuleEngine,
    repository: Arc<dyn RuleRepository>,
    opener: Arc<dyn UrlOpener>,
    event_log: Arc<dyn EventLogSink>,
    notifier: Arc<dyn UserNotifier>,
}

impl AppController {
    /// Creates the controller and loads (or seeds) the rule list.
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            repository,
            opener,
            event_log,
            notifier,
        } = collaborators;

        let rules = load_rules(repository.as_ref());
        let engine = RuleEngine::new(
            Arc::clone(&opener),
            Arc::clone(&event_log),
            Arc::clone(&notifier),
        );

        Self {
            rules,
            pause: PauseState::Active,
            engine,
            repository,
            opener,
            event_log,
            notifier,
        }
    }

    /// Handles a network transition reported by the watcher.
    ///
    /// Paused: returns immediately without a lookup.  `None` (left Wi-Fi)
    /// never matches.  Otherwise the stored rules are re-read first so rules
    /// added by another process take part in the lookup.
    pub fn on_ssid_changed(&mut self, ssid: Option<&str>) -> DispatchOutcome {
        if self.pause.is_paused() {
            debug!("monitoring paused; ignoring change to {ssid:?}");
            return DispatchOutcome::Paused;
        }
        let Some(ssid) = ssid else {
            debug!("left WiFi");
            return DispatchOutcome::NoNetwork;
        };
        info!("current SSID: {ssid}");
        refresh_rules(&mut self.rules, self.repository.as_ref());
        self.engine.dispatch(&self.rules, ssid)
    }

    /// Add-rule action.  Inputs are trimmed; on error the user is notified
    /// and the rule list is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AddRuleError`] for blank inputs, unusable URLs, or a failed
    /// write to the preferences store.
    pub fn add_rule(&mut self, ssid: &str, url: &str) -> Result<Rule, AddRuleError> {
        let result = validate_new_rule(ssid, url, self.opener.as_ref()).and_then(|rule| {
            append_rule(&mut self.rules, self.repository.as_ref(), rule.clone())?;
            Ok(rule)
        });

        match &result {
            Ok(rule) => info!("added rule {:?} -> {}", rule.ssid, rule.url),
            Err(e) => {
                info!("rule not added: {e}");
                self.notifier.alert(&e.notice());
            }
        }
        result
    }

    /// Flips the pause switch and returns the new state.
    pub fn toggle_pause(&mut self) -> PauseState {
        self.pause = self.pause.toggled();
        info!(
            "monitoring {}",
            if self.pause.is_paused() { "paused" } else { "resumed" }
        );
        self.pause
    }

    /// View-logs action.  On error the user is notified.
    ///
    /// # Errors
    ///
    /// Returns [`ViewLogsError`] if the log cannot be located or opened.
    pub fn view_logs(&self) -> Result<PathBuf, ViewLogsError> {
        let result = view_logs(self.event_log.as_ref(), self.opener.as_ref());
        if let Err(e) = &result {
            info!("cannot show logs: {e}");
            self.notifier.alert(&e.notice());
        }
        result
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Re-reads the stored rules and returns the current list.
    pub fn reload_rules(&mut self) -> &RuleSet {
        refresh_rules(&mut self.rules, self.repository.as_ref());
        &self.rules
    }

    pub fn pause_state(&self) -> PauseState {
        self.pause
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
