//! wifi-opener library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does wifi-opener do?
//!
//! The agent sits in the background (menu bar on macOS, user service on
//! Linux) and:
//!
//! 1. Asks the OS, twice a second, which Wi-Fi network the machine is joined to.
//! 2. When that network changes, looks up the first user rule whose SSID
//!    matches the new network exactly.
//! 3. Checks the rule's URL has a scheme and that some application can open it.
//! 4. Opens the URL with the default handler and appends a line to
//!    `~/Documents/openURLLogs.txt`.
//!
//! Rules are added from the menu (or the `add-rule` subcommand) and kept in a
//! small JSON preferences store.

/// Application layer: use cases and the owning controller.
pub mod application;

/// Infrastructure layer: OS adapters, storage and the menu bridge.
pub mod infrastructure;
