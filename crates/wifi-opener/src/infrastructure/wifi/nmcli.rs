//! NetworkManager interface query via `nmcli`.
//!
//! `nmcli -t -f ACTIVE,DEVICE,SSID device wifi list --rescan no` prints one
//! line per visible access point, e.g.:
//!
//! ```text
//! no:wlp2s0:Guest
//! yes:wlp2s0:Home\:Net
//! ```
//!
//! Terse mode escapes `:` and `\` inside values with a backslash.  Every
//! device listed becomes one reading; its SSID is that of the `yes` line, if
//! any.  `--rescan no` keeps the query cheap enough to run twice a second.

use wifi_opener_core::InterfaceReading;

use super::run_tool;
use crate::application::watch_network::{WifiError, WifiInterfaceSource};

const NMCLI: &str = "nmcli";

/// NetworkManager implementation of [`WifiInterfaceSource`].
#[derive(Debug, Default)]
pub struct NmcliSource;

impl NmcliSource {
    pub fn new() -> Self {
        Self
    }
}

impl WifiInterfaceSource for NmcliSource {
    fn interfaces(&self) -> Result<Vec<InterfaceReading>, WifiError> {
        let output = run_tool(
            NMCLI,
            &["-t", "-f", "ACTIVE,DEVICE,SSID", "device", "wifi", "list", "--rescan", "no"],
        )?;
        Ok(parse_wifi_list(&output))
    }
}

/// Parses terse `ACTIVE,DEVICE,SSID` output into per-device readings.
pub fn parse_wifi_list(output: &str) -> Vec<InterfaceReading> {
    let mut readings: Vec<InterfaceReading> = Vec::new();

    for line in output.lines() {
        let fields = split_terse(line);
        let [active, device, ssid] = fields.as_slice() else {
            continue;
        };
        if device.is_empty() {
            continue;
        }

        let position = match readings.iter().position(|r| &r.name == device) {
            Some(index) => index,
            None => {
                readings.push(InterfaceReading::new(device.clone(), None));
                readings.len() - 1
            }
        };

        if active == "yes" && readings[position].ssid.is_none() {
            readings[position].ssid = Some(ssid.clone());
        }
    }

    readings
}

/// Splits one terse line on unescaped `:` and removes the escapes.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}
