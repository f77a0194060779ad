//! # wifi-opener-core
//!
//! Shared library for wifi-opener containing the rule list, the SSID change
//! tracker, the pause switch and the log line format.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks or the file
//! system.  Everything that talks to the operating system lives in the
//! `wifi-opener` agent crate.
//!
//! # Architecture overview
//!
//! wifi-opener watches the name of the Wi-Fi network the machine is joined
//! to and opens a URL when that name matches a user rule:
//!
//! ```text
//! timer tick ─> read interfaces ─> select_ssid ─> SsidTracker::observe
//!                                                     │ (changed)
//!                                                     v
//!                          paused? ─> RuleSet::find_match ─> open + LogEntry
//! ```
//!
//! - **`domain::rule`** – `Rule` and the ordered `RuleSet` (first match wins).
//! - **`domain::monitor`** – `SsidTracker` (transition detection) and
//!   `PauseState`.
//! - **`domain::interface`** – picks the SSID of the first wireless interface.
//! - **`domain::url_check`** – syntactic URL validation.
//! - **`domain::log_entry`** – the fixed one-line log format.

pub mod domain;

pub use domain::interface::{select_ssid, InterfaceReading};
pub use domain::log_entry::LogEntry;
pub use domain::monitor::{PauseState, SsidTracker};
pub use domain::rule::{Rule, RuleSet, DEFAULT_RULE_SSID, DEFAULT_RULE_URL};
pub use domain::url_check::{parse_url, UrlError};
