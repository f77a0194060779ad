//! The log line appended after every successful URL open.
//!
//! Format (fixed, one line per entry):
//!
//! ```text
//! <timestamp>: Opened <url> for WiFi <ssid>
//! ```
//!
//! The timestamp is rendered by the caller; this type only owns the layout.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub url: String,
    pub ssid: String,
}

impl LogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        url: impl Into<String>,
        ssid: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            url: url.into(),
            ssid: ssid.into(),
        }
    }

    /// The entry followed by a newline, ready to append to the log file.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Opened {} for WiFi {}", self.timestamp, self.url, self.ssid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_display_matches_fixed_format() {
        let entry = LogEntry::new("2024-05-01 08:30:00 +0000", "https://example.com/home", "HAS");
        assert_eq!(
            entry.to_string(),
            "2024-05-01 08:30:00 +0000: Opened https://example.com/home for WiFi HAS"
        );
    }

    #[test]
    fn test_to_line_appends_single_newline() {
        let line = LogEntry::new("t", "u", "s").to_line();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }
}
