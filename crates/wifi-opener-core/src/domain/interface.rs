//! Network interface readings and SSID selection.
//!
//! The OS reports one [`InterfaceReading`] per network interface.  Wireless
//! adapters are recognised by a BSD-name prefix (`en` on macOS, `wl` on
//! Linux).  The SSID reported to the watcher is that of the first
//! wireless-prefixed interface that is associated with a network.

/// One `(interface name, SSID)` pair as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceReading {
    /// BSD interface name, e.g. `en0` or `wlp2s0`.
    pub name: String,
    /// Network name, or `None` when the interface is not associated.
    pub ssid: Option<String>,
}

impl InterfaceReading {
    pub fn new(name: impl Into<String>, ssid: Option<String>) -> Self {
        Self {
            name: name.into(),
            ssid,
        }
    }
}

/// Returns the SSID of the first interface whose name starts with
/// `wireless_prefix` and which reports a non-empty SSID.
pub fn select_ssid(readings: &[InterfaceReading], wireless_prefix: &str) -> Option<String> {
    readings
        .iter()
        .filter(|reading| reading.name.starts_with(wireless_prefix))
        .find_map(|reading| reading.ssid.clone().filter(|ssid| !ssid.is_empty()))
}
