//! Monitoring state: last-seen SSID and the pause switch.
//!
//! # Transition detection
//!
//! The watcher samples the current SSID twice a second.  Most samples repeat
//! the previous one; only a *change* is interesting.  [`SsidTracker`] keeps
//! the last-seen value and reports a transition whenever a new reading differs
//! from it.  `None` ("not joined to any network") is a value like any other,
//! so leaving a network and joining one are both transitions.
//!
//! The tracker starts at `None`, which means a machine that is already joined
//! to a network when the agent starts reports one transition on the first
//! tick.  Pausing does not touch the tracker: changes seen while paused still
//! move the last-seen value, and resuming never replays it.

/// Tracks the last-seen SSID and detects changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SsidTracker {
    previous: Option<String>,
}

impl SsidTracker {
    /// Creates a tracker whose last-seen value is `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `current` and returns it if it differs from the last-seen value.
    ///
    /// Returns `None` when the reading repeats the previous one.  When the
    /// reading is a change, the outer `Some` carries the new (nullable) SSID.
    pub fn observe(&mut self, current: Option<String>) -> Option<Option<String>> {
        if current == self.previous {
            return None;
        }
        self.previous = current.clone();
        Some(current)
    }

    /// The last-seen SSID.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

/// Two-state monitoring switch.  Never persisted; always starts `Active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PauseState {
    #[default]
    Active,
    Paused,
}

impl PauseState {
    /// Returns the opposite state.
    pub fn toggled(self) -> Self {
        match self {
            PauseState::Active => PauseState::Paused,
            PauseState::Paused => PauseState::Active,
        }
    }

    pub fn is_paused(self) -> bool {
        matches!(self, PauseState::Paused)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
