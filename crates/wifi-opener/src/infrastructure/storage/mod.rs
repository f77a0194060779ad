//! Storage infrastructure: everything the agent keeps on disk.
//!
//! - `config`      – the TOML agent configuration (`config.toml`).
//! - `preferences` – the JSON preferences store holding the rule list.
//! - `event_log`   – the append-only `openURLLogs.txt` record of URL opens.
//!
//! All three resolve their default locations from the environment and accept
//! an explicit path override from the configuration.

pub mod config;
pub mod event_log;
pub mod preferences;
