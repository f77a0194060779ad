//! Menu bridge: the agent's four-item menu as plain data.
//!
//! The menu-bar UI is reduced to three pieces:
//!
//! - [`MenuAction`] – the callback entry points (add rule, view logs, pause
//!   toggle, quit, plus listing rules).
//! - [`MenuModel`] – item labels and key equivalents, with the pause label
//!   refreshed from the current [`PauseState`].
//! - [`run_console`] – a line-oriented stdin reader thread that parses
//!   commands and forwards actions to the main loop over an mpsc channel.
//!
//! # Console commands
//!
//! ```text
//! add <ssid> <url>   add a rule (the URL is the last word, so SSIDs may contain spaces)
//! logs               open the event log
//! pause | p          pause or resume monitoring
//! rules              list rules in match order
//! quit | q           stop the agent
//! ```
//!
//! Incomplete `add` commands are still forwarded with blank fields so the
//! controller raises the same "empty input" notice the add-rule form would.

use std::io::BufRead;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use wifi_opener_core::{PauseState, RuleSet};

pub const PAUSE_LABEL: &str = "Pause monitoring";
pub const RESUME_LABEL: &str = "Resume monitoring";

/// One user intent from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    AddRule { ssid: String, url: String },
    ViewLogs,
    TogglePause,
    ListRules,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

/// Parses one console line into a [`MenuAction`].
///
/// # Errors
///
/// Returns [`MenuParseError`] for blank lines and unknown commands.
pub fn parse_menu_command(line: &str) -> Result<MenuAction, MenuParseError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => Err(MenuParseError::Empty),
        "add" => {
            let (ssid, url) = match rest.rsplit_once(char::is_whitespace) {
                Some((ssid, url)) => (ssid.trim(), url),
                None => (rest, ""),
            };
            Ok(MenuAction::AddRule {
                ssid: ssid.to_string(),
                url: url.to_string(),
            })
        }
        "logs" | "log" | "view-logs" => Ok(MenuAction::ViewLogs),
        "pause" | "resume" | "p" => Ok(MenuAction::TogglePause),
        "rules" | "list" => Ok(MenuAction::ListRules),
        "quit" | "exit" | "q" => Ok(MenuAction::Quit),
        other => Err(MenuParseError::UnknownCommand(other.to_string())),
    }
}

/// A rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub key_equivalent: Option<char>,
    pub command: &'static str,
}

/// Label for the pause item in `state`.
pub fn pause_label(state: PauseState) -> &'static str {
    if state.is_paused() {
        RESUME_LABEL
    } else {
        PAUSE_LABEL
    }
}

/// The menu contents.
#[derive(Debug, Clone, Default)]
pub struct MenuModel {
    pause: PauseState,
}

impl MenuModel {
    pub fn new(pause: PauseState) -> Self {
        Self { pause }
    }

    /// Call after every toggle.
    pub fn set_pause_state(&mut self, pause: PauseState) {
        self.pause = pause;
    }

    pub fn pause_label(&self) -> &'static str {
        pause_label(self.pause)
    }

    pub fn items(&self) -> Vec<MenuItem> {
        vec![
            MenuItem {
                label: "Add Rule",
                key_equivalent: None,
                command: "add <ssid> <url>",
            },
            MenuItem {
                label: "View Logs",
                key_equivalent: None,
                command: "logs",
            },
            MenuItem {
                label: self.pause_label(),
                key_equivalent: Some('p'),
                command: "pause",
            },
            MenuItem {
                label: "Quit",
                key_equivalent: Some('q'),
                command: "quit",
            },
        ]
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for item in self.items() {
            let key = item
                .key_equivalent
                .map(|k| format!(" [{k}]"))
                .unwrap_or_default();
            out.push_str(&format!("  {:<20} {}{}\n", item.label, item.command, key));
        }
        out.push_str(&format!("  {:<20} {}\n", "List Rules", "rules"));
        out
    }
}

/// Formats the rule list in match order, one rule per line.
pub fn render_rules(rules: &RuleSet) -> String {
    if rules.is_empty() {
        return "  (no rules)\n".to_string();
    }
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("  {}. {} -> {}\n", i + 1, rule.ssid, rule.url))
        .collect()
}

/// Starts the console reader on its own thread and returns immediately.
///
/// Each parsed line is forwarded to `actions`; end of input is reported as
/// [`MenuAction::Quit`].  A blocking stdin read cannot be cancelled, so the
/// reader runs outside the async runtime and never holds up its shutdown.
pub fn run_console(actions: mpsc::Sender<MenuAction>) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("console-menu".into())
        .spawn(move || read_commands(std::io::stdin().lock(), &actions))
}

/// Reads commands from `input` until EOF or `quit`.
pub fn read_commands(input: impl BufRead, actions: &mpsc::Sender<MenuAction>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("console read failed: {e}");
                break;
            }
        };

        match parse_menu_command(&line) {
            Ok(action) => {
                let quit = action == MenuAction::Quit;
                if actions.blocking_send(action).is_err() || quit {
                    return;
                }
            }
            Err(MenuParseError::Empty) => {}
            Err(e) => println!("{e}; try add, logs, pause, rules or quit"),
        }
    }

    debug!("console input closed");
    let _ = actions.blocking_send(MenuAction::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_takes_last_word_as_url() {
        assert_eq!(
            parse_menu_command("add Coffee Shop 5G https://menu.example"),
            Ok(MenuAction::AddRule {
                ssid: "Coffee Shop 5G".into(),
                url: "https://menu.example".into()
            })
        );
    }

    #[test]
    fn test_parse_add_with_missing_url_forwards_blank_field() {
        assert_eq!(
            parse_menu_command("add HAS"),
            Ok(MenuAction::AddRule {
                ssid: "HAS".into(),
                url: String::new()
            })
        );
        assert_eq!(
            parse_menu_command("add"),
            Ok(MenuAction::AddRule {
                ssid: String::new(),
                url: String::new()
            })
        );
    }

    #[test]
    fn test_parse_simple_commands_and_aliases() {
        assert_eq!(parse_menu_command("logs"), Ok(MenuAction::ViewLogs));
        assert_eq!(parse_menu_command("  PAUSE "), Ok(MenuAction::TogglePause));
        assert_eq!(parse_menu_command("p"), Ok(MenuAction::TogglePause));
        assert_eq!(parse_menu_command("rules"), Ok(MenuAction::ListRules));
        assert_eq!(parse_menu_command("q"), Ok(MenuAction::Quit));
    }

    #[test]
    fn test_parse_rejects_blank_and_unknown() {
        assert_eq!(parse_menu_command("   "), Err(MenuParseError::Empty));
        assert_eq!(
            parse_menu_command("reboot now"),
            Err(MenuParseError::UnknownCommand("reboot".into()))
        );
    }

    #[test]
    fn test_pause_label_follows_state() {
        // Arrange
        let mut menu = MenuModel::default();
        assert_eq!(menu.pause_label(), PAUSE_LABEL);

        // Act
        menu.set_pause_state(PauseState::Paused);

        // Assert
        assert_eq!(menu.pause_label(), RESUME_LABEL);
        assert!(menu.items().iter().any(|item| item.label == RESUME_LABEL));
    }

    #[test]
    fn test_menu_has_four_items_in_order() {
        let labels: Vec<_> = MenuModel::default().items().iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["Add Rule", "View Logs", PAUSE_LABEL, "Quit"]);
    }

    #[test]
    fn test_render_rules_numbers_in_match_order() {
        let rules = RuleSet::seeded();
        assert_eq!(render_rules(&rules), "  1. HAS -> https://example.com/home\n");
        assert_eq!(render_rules(&RuleSet::new()), "  (no rules)\n");
    }

    #[test]
    fn test_read_commands_forwards_actions_and_quits_at_eof() {
        // Arrange
        let (tx, mut rx) = mpsc::channel(8);
        let input = std::io::Cursor::new("rules\n\nbogus\nadd HAS https://example.com/home\n");

        // Act
        read_commands(input, &tx);

        // Assert
        assert_eq!(rx.try_recv(), Ok(MenuAction::ListRules));
        assert_eq!(
            rx.try_recv(),
            Ok(MenuAction::AddRule {
                ssid: "HAS".into(),
                url: "https://example.com/home".into()
            })
        );
        assert_eq!(rx.try_recv(), Ok(MenuAction::Quit));
    }

    #[test]
    fn test_read_commands_stops_after_quit() {
        let (tx, mut rx) = mpsc::channel(8);
        read_commands(std::io::Cursor::new("q\nlogs\n"), &tx);

        assert_eq!(rx.try_recv(), Ok(MenuAction::Quit));
        assert!(rx.try_recv().is_err());
    }
}
