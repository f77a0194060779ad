//! Integration tests for the agent: watcher, controller and real file storage
//! wired together through the public API, the same way `main.rs` wires them.
//!
//! OS-facing adapters that would launch programs (URL opener, notifier,
//! interface query) are replaced by the recording mocks in
//! `infrastructure::*::mock` and a `mockall` notifier.  The preferences store
//! and event log use real files in a per-test temp directory.

use std::path::PathBuf;
use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use mockall::mock;
use tokio::sync::mpsc;

use wifi_opener::application::controller::{AppController, Collaborators};
use wifi_opener::application::dispatch_rule::DispatchOutcome;
use wifi_opener::application::notify::{Notice, UserNotifier};
use wifi_opener::application::watch_network::{NetworkWatcher, WatchEvent};
use wifi_opener::infrastructure::storage::event_log::EventLogFile;
use wifi_opener::infrastructure::storage::event_log::mock::MemoryEventLog;
use wifi_opener::infrastructure::storage::preferences::mock::MemoryRuleRepository;
use wifi_opener::infrastructure::storage::preferences::PreferencesStore;
use wifi_opener::infrastructure::url_opener::mock::MockUrlOpener;
use wifi_opener::infrastructure::wifi::mock::ScriptedInterfaceSource;
use wifi_opener_core::{Rule, RuleSet};

mock! {
    pub Notifier {}

    impl UserNotifier for Notifier {
        fn alert(&self, notice: &Notice);
    }
}

/// A notifier that fails the test if anything is shown.
fn silent_notifier() -> MockNotifier {
    let mut notifier = MockNotifier::new();
    notifier.expect_alert().times(0);
    notifier
}

/// Per-test scratch directory, removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("wifi_opener_it_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

// ── Change detection end to end ───────────────────────────────────────────────

/// Readings `[None, HAS, HAS, Guest, None]` with `{HAS -> U}` make exactly two
/// dispatch attempts: HAS opens U and logs it, Guest matches nothing.
#[test]
fn test_reading_sequence_opens_once_and_logs_once() {
    // Arrange
    let opener = Arc::new(MockUrlOpener::accepting_web());
    let log = Arc::new(MemoryEventLog::new());
    let mut controller = AppController::new(Collaborators {
        repository: Arc::new(MemoryRuleRepository::with_rules(RuleSet::from(vec![Rule::new(
            "HAS",
            "https://example.com/home",
        )]))),
        opener: opener.clone(),
        event_log: log.clone(),
        notifier: Arc::new(silent_notifier()),
    });
    let source = ScriptedInterfaceSource::from_ssids(
        "wlan0",
        vec![None, Some("HAS"), Some("HAS"), Some("Guest"), None],
    );
    let mut watcher = NetworkWatcher::new(Arc::new(source), "wl");

    // Act
    let mut outcomes = Vec::new();
    for _ in 0..5 {
        watcher.poll_with(|ssid| outcomes.push(controller.on_ssid_changed(ssid)));
    }

    // Assert: HAS, Guest, then leaving Wi-Fi.
    let attempts: Vec<_> = outcomes.iter().filter(|o| o.attempted()).collect();
    assert_eq!(attempts.len(), 2);
    assert_eq!(
        outcomes,
        vec![
            DispatchOutcome::Opened {
                rule: Rule::new("HAS", "https://example.com/home"),
                logged: true
            },
            DispatchOutcome::NoMatch {
                ssid: "Guest".into()
            },
            DispatchOutcome::NoNetwork,
        ]
    );
    assert_eq!(opener.opened(), vec!["https://example.com/home".to_string()]);
    assert_eq!(
        log.entries(),
        vec![("HAS".to_string(), "https://example.com/home".to_string())]
    );
}

#[test]
fn test_pause_suppresses_matching_and_resume_does_not_retrigger() {
    // Arrange
    let opener = Arc::new(MockUrlOpener::accepting_web());
    let mut controller = AppController::new(Collaborators {
        repository: Arc::new(MemoryRuleRepository::empty()),
        opener: opener.clone(),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(silent_notifier()),
    });
    let source = ScriptedInterfaceSource::from_ssids("wlan0", vec![None, Some("HAS")]);
    let mut watcher = NetworkWatcher::new(Arc::new(source), "wl");

    // Act: pause, join HAS, resume, keep sampling HAS.
    controller.toggle_pause();
    let mut outcomes = Vec::new();
    watcher.poll_with(|ssid| outcomes.push(controller.on_ssid_changed(ssid)));
    watcher.poll_with(|ssid| outcomes.push(controller.on_ssid_changed(ssid)));
    controller.toggle_pause();
    for _ in 0..3 {
        watcher.poll_with(|ssid| outcomes.push(controller.on_ssid_changed(ssid)));
    }

    // Assert
    assert_eq!(outcomes, vec![DispatchOutcome::Paused]);
    assert!(opener.opened().is_empty());
    assert_eq!(watcher.last_seen(), Some("HAS"));
}

/// The spawned watcher task reports transitions over the channel.
#[tokio::test(start_paused = true)]
async fn test_watcher_task_feeds_transitions_to_channel() {
    // Arrange
    let source = ScriptedInterfaceSource::from_ssids("wlan0", vec![Some("HAS"), Some("HAS"), None]);
    let watcher = NetworkWatcher::new(Arc::new(source), "wl");
    let (tx, mut rx) = mpsc::channel(8);
    let running = Arc::new(AtomicBool::new(true));

    // Act
    let task = tokio::spawn(watcher.run(Duration::from_millis(500), tx, running));
    let first = rx.recv().await;
    let second = rx.recv().await;
    task.abort();

    // Assert
    assert_eq!(first, Some(WatchEvent::SsidChanged(Some("HAS".into()))));
    assert_eq!(second, Some(WatchEvent::SsidChanged(None)));
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[test]
fn test_fresh_install_seeds_default_rule_on_disk() {
    // Arrange
    let scratch = Scratch::new();
    let prefs = scratch.path("preferences.json");

    // Act
    let controller = AppController::new(Collaborators {
        repository: Arc::new(PreferencesStore::new(&prefs)),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(silent_notifier()),
    });

    // Assert
    assert_eq!(controller.rules(), &RuleSet::seeded());
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&prefs).expect("read")).expect("json");
    assert_eq!(
        raw,
        serde_json::json!({ "wifiRules": [ { "ssid": "HAS", "url": "https://example.com/home" } ] })
    );
}

#[test]
fn test_added_rule_survives_restart() {
    // Arrange
    let scratch = Scratch::new();
    let prefs = scratch.path("preferences.json");
    let collaborators = || Collaborators {
        repository: Arc::new(PreferencesStore::new(&prefs)),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(silent_notifier()),
    };

    // Act
    let mut first = AppController::new(collaborators());
    first.add_rule(" Office ", " https://intranet.example ").expect("add");
    drop(first);
    let second = AppController::new(collaborators());

    // Assert
    assert_eq!(
        second.rules(),
        &RuleSet::from(vec![
            Rule::new("HAS", "https://example.com/home"),
            Rule::new("Office", "https://intranet.example"),
        ])
    );
}

#[test]
fn test_corrupt_rules_start_empty_and_are_not_rewritten() {
    // Arrange
    let scratch = Scratch::new();
    let prefs = scratch.path("preferences.json");
    std::fs::write(&prefs, r#"{ "wifiRules": 42 }"#).expect("write");

    // Act
    let controller = AppController::new(Collaborators {
        repository: Arc::new(PreferencesStore::new(&prefs)),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(silent_notifier()),
    });

    // Assert
    assert!(controller.rules().is_empty());
    assert_eq!(
        std::fs::read_to_string(&prefs).expect("read"),
        r#"{ "wifiRules": 42 }"#
    );
}

/// The agent and the `add-rule` command hold separate controllers over the
/// same preferences file; neither may drop the other's rule.
#[test]
fn test_rules_added_by_two_processes_are_both_kept() {
    // Arrange
    let scratch = Scratch::new();
    let prefs = scratch.path("preferences.json");
    let collaborators = || Collaborators {
        repository: Arc::new(PreferencesStore::new(&prefs)),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(silent_notifier()),
    };
    let mut agent = AppController::new(collaborators());
    let mut cli = AppController::new(collaborators());

    // Act
    cli.add_rule("FromCli", "https://cli.example").expect("cli add");
    let outcome = agent.on_ssid_changed(Some("FromCli"));
    agent.add_rule("FromMenu", "https://menu.example").expect("menu add");
    let restarted = AppController::new(collaborators());

    // Assert
    assert!(matches!(outcome, DispatchOutcome::Opened { .. }));
    let expected = RuleSet::from(vec![
        Rule::new("HAS", "https://example.com/home"),
        Rule::new("FromCli", "https://cli.example"),
        Rule::new("FromMenu", "https://menu.example"),
    ]);
    assert_eq!(agent.rules(), &expected);
    assert_eq!(restarted.rules(), &expected);
}

#[test]
fn test_add_to_corrupt_store_names_the_file_to_repair() {
    // Arrange
    let scratch = Scratch::new();
    let prefs = scratch.path("preferences.json");
    std::fs::write(&prefs, "{ not json").expect("write");
    let expected_path = prefs.display().to_string();
    let mut notifier = MockNotifier::new();
    notifier
        .expect_alert()
        .withf(move |notice| {
            notice.title == "Could not save rule" && notice.message.contains(&expected_path)
        })
        .times(1)
        .return_const(());
    let mut controller = AppController::new(Collaborators {
        repository: Arc::new(PreferencesStore::new(&prefs)),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(notifier),
    });

    // Act
    let result = controller.add_rule("Cafe", "https://menu.example");

    // Assert
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&prefs).expect("read"), "{ not json");
}

// ── Add-rule validation ───────────────────────────────────────────────────────

#[test]
fn test_invalid_url_is_rejected_with_a_notice() {
    // Arrange
    let mut notifier = MockNotifier::new();
    notifier
        .expect_alert()
        .withf(|notice| notice.title == "Invalid URL" && notice.message.contains("intranet"))
        .times(1)
        .return_const(());
    let repo = Arc::new(MemoryRuleRepository::empty());
    let mut controller = AppController::new(Collaborators {
        repository: repo.clone(),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(notifier),
    });

    // Act
    let result = controller.add_rule("Office", "intranet.example/start");

    // Assert
    assert!(result.is_err());
    assert_eq!(controller.rules(), &RuleSet::seeded());
    assert_eq!(repo.stored(), Some(RuleSet::seeded()));
}

#[test]
fn test_malformed_url_with_scheme_is_not_persisted() {
    // Arrange
    let mut notifier = MockNotifier::new();
    notifier
        .expect_alert()
        .withf(|notice| notice.title == "Invalid URL")
        .times(4)
        .return_const(());
    let repo = Arc::new(MemoryRuleRepository::empty());
    let mut controller = AppController::new(Collaborators {
        repository: repo.clone(),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(notifier),
    });

    // Act
    let results: Vec<_> = [
        "http://[bad",
        "https://",
        "http://exa%zzmple.com",
        "https://host:99999999/",
    ]
    .iter()
    .map(|url| controller.add_rule("Cafe", url))
    .collect();

    // Assert
    assert!(results.iter().all(Result::is_err));
    assert_eq!(controller.rules(), &RuleSet::seeded());
    assert_eq!(repo.stored(), Some(RuleSet::seeded()));
}

#[test]
fn test_empty_input_is_rejected_with_a_notice() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_alert()
        .withf(|notice| *notice == Notice::empty_fields())
        .times(1)
        .return_const(());
    let mut controller = AppController::new(Collaborators {
        repository: Arc::new(MemoryRuleRepository::empty()),
        opener: Arc::new(MockUrlOpener::accepting_web()),
        event_log: Arc::new(MemoryEventLog::new()),
        notifier: Arc::new(notifier),
    });

    assert!(controller.add_rule("   ", "https://a.example").is_err());
    assert_eq!(controller.rules().len(), 1);
}

// ── Event log ─────────────────────────────────────────────────────────────────

#[test]
fn test_open_appends_formatted_line_to_log_file() {
    // Arrange
    let scratch = Scratch::new();
    let log_path = scratch.path("openURLLogs.txt");
    let opener = Arc::new(MockUrlOpener::accepting_web());
    let mut controller = AppController::new(Collaborators {
        repository: Arc::new(MemoryRuleRepository::empty()),
        opener: opener.clone(),
        event_log: Arc::new(EventLogFile::at(&log_path)),
        notifier: Arc::new(silent_notifier()),
    });

    // Act
    controller.on_ssid_changed(Some("HAS"));
    let viewed = controller.view_logs().expect("view logs");

    // Assert
    let text = std::fs::read_to_string(&log_path).expect("read log");
    let line = text.lines().next().expect("one line");
    let (timestamp, rest) = line.split_once(": ").expect("timestamp separator");
    assert_eq!(rest, "Opened https://example.com/home for WiFi HAS");
    assert_eq!(timestamp.len(), "2024-05-01 08:30:00 +0000".len());
    assert!(timestamp.ends_with(" +0000"));
    assert_eq!(viewed, log_path);
    assert_eq!(opener.opened_paths(), vec![log_path.clone()]);
}
