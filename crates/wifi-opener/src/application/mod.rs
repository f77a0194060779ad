//! Application layer use cases for the agent.
//!
//! # What use cases does the agent have?
//!
//! - **`watch_network`** – Samples the OS for the current SSID on a fixed
//!   period and reports transitions.  The OS query is made by a
//!   `WifiInterfaceSource` implementation injected at construction time.
//!
//! - **`dispatch_rule`** – Matches a new SSID against the rule list, validates
//!   the rule URL, opens it and writes the event log.
//!
//! - **`manage_rules`** – Loads the persisted rule list (seeding it on first
//!   run) and validates/appends new rules.
//!
//! - **`view_logs`** – Locates the event log file and opens it.
//!
//! - **`notify`** – User-facing notices (the dialogs of the menu-bar app).
//!
//! - **`controller`** – `AppController`, the single owner of the rule list and
//!   pause switch that every menu action and SSID change goes through.
//!
//! The traits for OS-facing collaborators are declared here; their
//! implementations live in `infrastructure`.

pub mod controller;
pub mod dispatch_rule;
pub mod manage_rules;
pub mod notify;
pub mod view_logs;
pub mod watch_network;
