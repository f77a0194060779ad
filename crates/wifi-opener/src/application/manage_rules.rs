//! Rule list lifecycle: first-run seeding, loading and appending.
//!
//! The persisted list and the in-memory [`RuleSet`] are kept identical by
//! writing the *whole* list after every mutation.  Another process (the
//! `add-rule` command next to a running agent) may write the same store, so
//! every append starts from the stored list, and the in-memory list is only
//! replaced once the write has succeeded.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};
use wifi_opener_core::{Rule, RuleSet};

use super::dispatch_rule::{validate_url, UrlOpener, UrlRejection};
use super::notify::Notice;

/// Error type for rule persistence.
#[derive(Debug, Error)]
pub enum RuleStoreError {
    /// The stored value exists but is not a list of `{ssid, url}` records.
    #[error("stored rules could not be decoded: {0}")]
    Decode(String),

    /// The store itself could not be read or written.
    #[error("rule storage unavailable: {0}")]
    Storage(String),
}

/// Persistence for the rule list.
pub trait RuleRepository: Send + Sync {
    /// Returns the stored rules, or `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`RuleStoreError`] if the store or the stored value is unreadable.
    fn load(&self) -> Result<Option<RuleSet>, RuleStoreError>;

    /// Replaces the stored rules with `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleStoreError::Storage`] if the write fails.
    fn save(&self, rules: &RuleSet) -> Result<(), RuleStoreError>;

    /// The file backing the store, for messages that ask the user to repair it.
    fn location(&self) -> Option<PathBuf> {
        None
    }
}

/// Loads the rule list.
///
/// - Nothing stored yet: seeds the default rule and persists it.
/// - Stored value unreadable: logs a warning and starts empty, leaving the
///   stored value untouched.
pub fn load_rules(repository: &dyn RuleRepository) -> RuleSet {
    match repository.load() {
        Ok(Some(rules)) => {
            info!("loaded {} rule(s)", rules.len());
            rules
        }
        Ok(None) => {
            let rules = RuleSet::seeded();
            info!("no stored rules; seeding default rule");
            if let Err(e) = repository.save(&rules) {
                warn!("failed to persist default rule: {e}");
            }
            rules
        }
        Err(e) => {
            warn!("failed to load rules, continuing with none: {e}");
            RuleSet::new()
        }
    }
}

/// Re-reads the stored list into `current`.
///
/// Nothing stored, or a store that cannot be read, leaves `current` as is.
pub fn refresh_rules(current: &mut RuleSet, repository: &dyn RuleRepository) {
    match repository.load() {
        Ok(Some(stored)) => {
            if stored != *current {
                info!("stored rules changed; now {} rule(s)", stored.len());
                *current = stored;
            }
        }
        Ok(None) => {}
        Err(e) => debug!("keeping in-memory rules: {e}"),
    }
}

/// Why a rule was not added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddRuleError {
    #[error("WiFi name and URL must both be filled in")]
    EmptyField,

    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: UrlRejection },

    #[error("could not persist rules: {reason}")]
    Persist {
        reason: String,
        location: Option<PathBuf>,
    },
}

impl AddRuleError {
    /// The notice shown to the user for this error.
    pub fn notice(&self) -> Notice {
        match self {
            AddRuleError::EmptyField => Notice::empty_fields(),
            AddRuleError::InvalidUrl { url, .. } => Notice::invalid_url(url),
            AddRuleError::Persist { reason, location } => {
                Notice::save_failed(reason, location.as_deref())
            }
        }
    }
}

/// Trims the add-rule form inputs and validates them.
///
/// # Errors
///
/// Returns [`AddRuleError::EmptyField`] if either input is blank, or
/// [`AddRuleError::InvalidUrl`] if the URL has no scheme or no handler.
pub fn validate_new_rule(
    ssid: &str,
    url: &str,
    opener: &dyn UrlOpener,
) -> Result<Rule, AddRuleError> {
    let ssid = ssid.trim();
    let url = url.trim();

    if ssid.is_empty() || url.is_empty() {
        return Err(AddRuleError::EmptyField);
    }

    validate_url(url, opener).map_err(|reason| AddRuleError::InvalidUrl {
        url: url.to_string(),
        reason,
    })?;

    Ok(Rule::new(ssid, url))
}

/// Appends `rule` to the stored list, persists it, then adopts it as `rules`.
///
/// When nothing is stored yet the append starts from `rules`.
///
/// # Errors
///
/// Returns [`AddRuleError::Persist`] if the stored list cannot be read or
/// the write fails; `rules` is then left unchanged.
pub fn append_rule(
    rules: &mut RuleSet,
    repository: &dyn RuleRepository,
    rule: Rule,
) -> Result<(), AddRuleError> {
    let persist_error = |e: RuleStoreError| AddRuleError::Persist {
        reason: e.to_string(),
        location: repository.location(),
    };

    let mut updated = match repository.load() {
        Ok(Some(stored)) => stored,
        Ok(None) => rules.clone(),
        Err(e) => return Err(persist_error(e)),
    };
    updated.push(rule);
    repository.save(&updated).map_err(persist_error)?;
    *rules = updated;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
