//! Rule domain entity and the ordered rule list.
//!
//! A [`Rule`] pairs a Wi-Fi network name with the URL to open when the
//! machine joins that network.  Rules live in a [`RuleSet`] whose order is
//! significant: lookups return the *first* rule whose SSID matches, so two
//! rules for the same network are allowed and the older one wins.

use serde::{Deserialize, Serialize};

/// SSID of the rule seeded on first run.
pub const DEFAULT_RULE_SSID: &str = "HAS";

/// URL of the rule seeded on first run.
pub const DEFAULT_RULE_URL: &str = "https://example.com/home";

/// A single `(ssid, url)` pair.
///
/// Rules are immutable once created.  The serialized form is the flat
/// `{"ssid": ..., "url": ...}` record stored in the preferences store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Network name, compared exactly (case-sensitive, no normalization).
    pub ssid: String,
    /// URL handed to the OS default handler on match.
    pub url: String,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(ssid: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            url: url.into(),
        }
    }

    /// The rule seeded into an empty preferences store.
    pub fn default_rule() -> Self {
        Self::new(DEFAULT_RULE_SSID, DEFAULT_RULE_URL)
    }
}

/// Ordered list of rules.
///
/// Serializes transparently as a JSON array of [`Rule`] records so that the
/// persisted layout is exactly `[{"ssid": ..., "url": ...}, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set used on a fresh install: exactly one default rule.
    pub fn seeded() -> Self {
        Self {
            rules: vec![Rule::default_rule()],
        }
    }

    /// Returns the first rule (in insertion order) whose SSID equals `ssid`.
    pub fn find_match(&self, ssid: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.ssid == ssid)
    }

    /// Appends `rule` to the end of the list.  No deduplication.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
