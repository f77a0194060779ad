//! Infrastructure layer for the agent.
//!
//! Contains OS-facing adapters: the Wi-Fi interface query, URL launching,
//! user notices, file storage and the menu bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `wifi_opener_core`, but MUST NOT be imported by the `application` or
//! domain layers (test modules excepted, which borrow the mocks).
//!
//! # Sub-modules
//!
//! - **`wifi`** – `WifiInterfaceSource` implementations: `networksetup` on
//!   macOS, `nmcli` elsewhere, plus a scripted mock.
//!
//! - **`url_opener`** – `UrlOpener` implementations: LaunchServices +
//!   `/usr/bin/open` on macOS, `xdg-mime` + `xdg-open` elsewhere, plus a
//!   recording mock.
//!
//! - **`notifier`** – `UserNotifier` implementations: `osascript` alerts on
//!   macOS, `notify-send` elsewhere, a log-only notifier for headless runs.
//!
//! - **`storage`** – TOML agent config, the JSON preferences store holding the
//!   rule list, and the append-only event log file.
//!
//! - **`ui_bridge`** – The menu: action parsing, item labels and the console
//!   reader that feeds actions to the main loop.

pub mod notifier;
pub mod storage;
pub mod ui_bridge;
pub mod url_opener;
pub mod wifi;
