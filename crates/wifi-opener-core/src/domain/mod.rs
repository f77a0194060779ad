//! Domain entities for wifi-opener.
//!
//! Pure logic with no infrastructure dependencies: every type here can be
//! built and tested on any platform without a Wi-Fi adapter, a preferences
//! store or a browser.

/// Network interface readings and wireless SSID selection.
pub mod interface;

/// The log line written after a successful URL open.
pub mod log_entry;

/// Last-seen SSID tracking and the pause switch.
pub mod monitor;

/// Rules and the ordered rule list.
pub mod rule;

/// URL scheme validation.
pub mod url_check;
