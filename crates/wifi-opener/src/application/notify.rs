//! User-facing notices.
//!
//! The menu-bar app reports every user-visible problem (bad URL, empty
//! input, missing log file) as a blocking alert.  Here a notice is a plain
//! title/message pair handed to a [`UserNotifier`]; what "showing" means is
//! up to the platform implementation.

use std::path::Path;

/// A title/message pair shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// A rule URL has no scheme or nothing can open it.
    pub fn invalid_url(url: &str) -> Self {
        Self::new(
            "Invalid URL",
            format!("The URL '{url}' is not valid or cannot be opened."),
        )
    }

    /// The add-rule form was submitted with a blank field.
    pub fn empty_fields() -> Self {
        Self::new(
            "Input cannot be empty",
            "Please make sure both the WiFi name and the URL are filled in.",
        )
    }

    pub fn no_log_file() -> Self {
        Self::new("No log file found", "No URL opens have been logged yet.")
    }

    pub fn no_documents_dir() -> Self {
        Self::new(
            "Cannot access documents directory",
            "The user documents directory could not be determined.",
        )
    }

    /// The rule list could not be written back to the preferences store.
    /// `location` is the store's file, which the user may have to repair.
    pub fn save_failed(reason: &str, location: Option<&Path>) -> Self {
        let mut message = format!("The rule was not saved: {reason}");
        if let Some(path) = location {
            message.push_str(&format!(
                "\n\nFix or remove {} and try again.",
                path.display()
            ));
        }
        Self::new("Could not save rule", message)
    }
}

/// Presents notices to the user.
pub trait UserNotifier: Send + Sync {
    /// Shows `notice`.  Implementations never fail; a notice that cannot be
    /// displayed is logged instead.
    fn alert(&self, notice: &Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_failed_points_at_the_store_file() {
        let path = Path::new("/home/u/.config/wifi-opener/preferences.json");
        let notice = Notice::save_failed("not a JSON object", Some(path));
        assert_eq!(notice.title, "Could not save rule");
        assert!(notice.message.starts_with("The rule was not saved: not a JSON object"));
        assert!(notice
            .message
            .contains("Fix or remove /home/u/.config/wifi-opener/preferences.json"));
    }

    #[test]
    fn test_save_failed_without_location_has_only_the_reason() {
        let notice = Notice::save_failed("disk full", None);
        assert_eq!(notice.message, "The rule was not saved: disk full");
    }
}
