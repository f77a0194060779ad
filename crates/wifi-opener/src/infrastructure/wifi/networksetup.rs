//! macOS interface query via `networksetup`.
//!
//! 1. `networksetup -listallhardwareports` lists every hardware port with its
//!    BSD device name (`Device: en0`), in system order.
//! 2. For each device carrying the wireless prefix,
//!    `networksetup -getairportnetwork <dev>` prints either
//!    `Current Wi-Fi Network: <ssid>` or a "not associated" message.
//!
//! Devices without the prefix are reported with no SSID and are never
//! queried, which keeps each tick to one process per Wi-Fi adapter.

use wifi_opener_core::InterfaceReading;

use super::run_tool;
use crate::application::watch_network::{WifiError, WifiInterfaceSource};

const NETWORKSETUP: &str = "/usr/sbin/networksetup";
const CURRENT_NETWORK_PREFIX: &str = "Current Wi-Fi Network: ";

/// macOS implementation of [`WifiInterfaceSource`].
pub struct NetworksetupSource {
    wireless_prefix: String,
}

impl NetworksetupSource {
    pub fn new(wireless_prefix: impl Into<String>) -> Self {
        Self {
            wireless_prefix: wireless_prefix.into(),
        }
    }
}

impl WifiInterfaceSource for NetworksetupSource {
    fn interfaces(&self) -> Result<Vec<InterfaceReading>, WifiError> {
        let ports = run_tool(NETWORKSETUP, &["-listallhardwareports"])?;

        let readings = parse_hardware_ports(&ports)
            .into_iter()
            .map(|device| {
                let ssid = if device.starts_with(self.wireless_prefix.as_str()) {
                    // A per-device failure only blanks that device.
                    run_tool(NETWORKSETUP, &["-getairportnetwork", device.as_str()])
                        .ok()
                        .and_then(|out| parse_airport_network(&out))
                } else {
                    None
                };
                InterfaceReading::new(device, ssid)
            })
            .collect();

        Ok(readings)
    }
}

/// Extracts the `Device:` names from `-listallhardwareports` output.
pub fn parse_hardware_ports(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Device:"))
        .map(|device| device.trim().to_string())
        .filter(|device| !device.is_empty())
        .collect()
}

/// Extracts the SSID from `-getairportnetwork` output, if associated.
pub fn parse_airport_network(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(CURRENT_NETWORK_PREFIX))
        .map(|ssid| ssid.trim_end_matches(['\r', '\n']).to_string())
        .filter(|ssid| !ssid.is_empty())
}
