//! wifi-opener agent entry point.
//!
//! Wires the platform adapters into an [`AppController`], starts the network
//! watcher and the console menu, then runs the single-threaded event loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                 -- config.toml (defaults if absent)
//!  └─ AppController::new()          -- loads or seeds the rule list
//!  └─ spawn tasks
//!       ├─ NetworkWatcher::run      -- samples the SSID, sends WatchEvent
//!       └─ run_console (thread)     -- parses stdin, sends MenuAction
//!  └─ event loop
//!       ├─ WatchEvent::SsidChanged  -> AppController::on_ssid_changed
//!       ├─ MenuAction               -> add rule / view logs / pause / quit
//!       └─ Ctrl-C                   -> shutdown
//! ```
//!
//! # Usage
//!
//! ```text
//! wifi-opener [--config <PATH>] [--log-level <LEVEL>] [COMMAND]
//!
//! Commands:
//!   run         Watch Wi-Fi and open matching URLs (default)
//!   add-rule    Add a rule: --ssid <SSID> --url <URL>
//!   list-rules  Print the rules in match order
//!   view-logs   Open the event log file
//! ```
//!
//! The log level is taken from `RUST_LOG` when set, then `--log-level`, then
//! `[agent] log_level` in the config file.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use wifi_opener::application::controller::{AppController, Collaborators};
use wifi_opener::application::notify::UserNotifier;
use wifi_opener::application::watch_network::{NetworkWatcher, WatchEvent};
use wifi_opener::infrastructure::notifier::{DesktopNotifier, LogNotifier};
use wifi_opener::infrastructure::storage::config::{load_config, AgentConfig};
use wifi_opener::infrastructure::storage::event_log::EventLogFile;
use wifi_opener::infrastructure::storage::preferences::PreferencesStore;
use wifi_opener::infrastructure::ui_bridge::{render_rules, run_console, MenuAction, MenuModel};
use wifi_opener::infrastructure::url_opener::NativeUrlOpener;
use wifi_opener::infrastructure::wifi::native_source;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Opens a configured URL whenever this machine joins a matching Wi-Fi network.
#[derive(Debug, Parser)]
#[command(name = "wifi-opener", version)]
struct Cli {
    /// Path to config.toml (default: platform config directory).
    #[arg(long, global = true, env = "WIFI_OPENER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Watch Wi-Fi and open matching URLs.
    Run {
        /// Do not read menu commands from stdin (for service managers).
        #[arg(long)]
        no_console: bool,
    },
    /// Add a rule and exit.
    AddRule {
        #[arg(long)]
        ssid: String,
        #[arg(long)]
        url: String,
    },
    /// Print the rules in match order.
    ListRules,
    /// Open the event log file with its default application.
    ViewLogs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match load_config(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AgentConfig::default(), Some(e)),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.agent.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = config_error {
        warn!("using default configuration: {e}");
    }

    match cli.command.unwrap_or(Command::Run { no_console: false }) {
        Command::Run { no_console } => run_agent(config, !no_console).await,
        Command::AddRule { ssid, url } => {
            let mut controller = AppController::new(collaborators(&config, Arc::new(LogNotifier))?);
            let rule = controller.add_rule(&ssid, &url)?;
            println!("added rule {} -> {}", rule.ssid, rule.url);
            Ok(())
        }
        Command::ListRules => {
            let controller = AppController::new(collaborators(&config, Arc::new(LogNotifier))?);
            print!("{}", render_rules(controller.rules()));
            Ok(())
        }
        Command::ViewLogs => {
            let controller = AppController::new(collaborators(&config, Arc::new(LogNotifier))?);
            let path = controller.view_logs()?;
            println!("opened {}", path.display());
            Ok(())
        }
    }
}

/// Builds the OS adapters, honouring the `[storage]` overrides.
fn collaborators(
    config: &AgentConfig,
    notifier: Arc<dyn UserNotifier>,
) -> anyhow::Result<Collaborators> {
    let repository = match &config.storage.preferences_file {
        Some(path) => PreferencesStore::new(path),
        None => PreferencesStore::at_default_location()
            .context("cannot locate the preferences store")?,
    };
    debug!("preferences store at {}", repository.path().display());

    Ok(Collaborators {
        repository: Arc::new(repository),
        opener: Arc::new(NativeUrlOpener::new()),
        event_log: Arc::new(EventLogFile::with_override(config.storage.log_file.clone())),
        notifier,
    })
}

/// The long-running agent: watcher, optional console menu and event loop.
async fn run_agent(config: AgentConfig, console: bool) -> anyhow::Result<()> {
    info!("wifi-opener starting");

    let mut controller = AppController::new(collaborators(&config, Arc::new(DesktopNotifier::new()))?);
    let mut menu = MenuModel::new(controller.pause_state());

    // Shutdown flag shared with the watcher.
    let running = Arc::new(AtomicBool::new(true));

    // ── Network watcher ───────────────────────────────────────────────────────
    let prefix = config.interface_prefix();
    let watcher = NetworkWatcher::new(Arc::new(native_source(&prefix)), prefix);
    let (watch_tx, mut watch_rx) = mpsc::channel::<WatchEvent>(16);
    let watcher_task = tokio::spawn(watcher.run(config.poll_interval(), watch_tx, Arc::clone(&running)));

    // ── Console menu ──────────────────────────────────────────────────────────
    let (menu_tx, mut menu_rx) = mpsc::channel::<MenuAction>(16);
    if console {
        print!("{}", menu.render());
        run_console(menu_tx).context("cannot start the console menu")?;
    } else {
        drop(menu_tx);
    }

    info!("wifi-opener ready with {} rule(s)", controller.rules().len());

    // ── Main event loop ───────────────────────────────────────────────────────
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            Some(event) = watch_rx.recv() => match event {
                WatchEvent::SsidChanged(ssid) => {
                    let outcome = controller.on_ssid_changed(ssid.as_deref());
                    debug!("dispatch outcome: {outcome:?}");
                }
            },
            Some(action) = menu_rx.recv() => {
                if handle_menu_action(&mut controller, &mut menu, action).is_break() {
                    break;
                }
            }
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    warn!("cannot listen for Ctrl-C: {e}");
                }
                info!("shutdown signal received");
                break;
            }
        }
    }

    running.store(false, Ordering::Relaxed);
    watcher_task.abort();
    info!("wifi-opener stopped");
    Ok(())
}

fn handle_menu_action(
    controller: &mut AppController,
    menu: &mut MenuModel,
    action: MenuAction,
) -> ControlFlow<()> {
    match action {
        MenuAction::AddRule { ssid, url } => {
            if let Ok(rule) = controller.add_rule(&ssid, &url) {
                println!("added rule {} -> {}", rule.ssid, rule.url);
            }
        }
        MenuAction::ViewLogs => {
            // Failures are shown to the user by the controller.
            let _ = controller.view_logs();
        }
        MenuAction::TogglePause => {
            menu.set_pause_state(controller.toggle_pause());
            print!("{}", menu.render());
        }
        MenuAction::ListRules => print!("{}", render_rules(controller.reload_rules())),
        MenuAction::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}
