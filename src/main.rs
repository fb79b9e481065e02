//! Command-line host for treefocus.
//!
//! This binary is the thin integration layer between the library and the
//! user: it plays the part an editor host would, turning invocations into
//! commands, surfacing errors, and printing decorations.
//!
//! # Usage
//!
//! ```text
//! treefocus hide build              # toggle the hidden mark on ./build
//! treefocus focus src/core          # toggle the focused mark on ./src/core
//! treefocus reset src/core          # clear any mark
//! treefocus hide-mode on            # exclude hidden items
//! treefocus focus-mode on           # restrict the tree to focused items
//! treefocus status                  # show modes and marks
//! treefocus decorate build src      # show badges for paths
//! treefocus run treefocus.refresh   # dispatch by host command id
//! ```
//!
//! Global options: `-C <dir>` selects the workspace directory (default: the
//! current directory), `--set key=value` overrides configuration.

#![allow(clippy::multiple_crate_versions)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use treefocus::app::Notification;
use treefocus::infrastructure::normalize;
use treefocus::ui::{render_status, DecorationProvider, RefreshScope, StatusViewModel};
use treefocus::{handle_command, initialize, Command, Config, Outcome, WorkspaceState};

/// Mark project tree items as hidden or focused
#[derive(Parser)]
#[command(name = "treefocus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Workspace directory (default: current directory)
    #[arg(short = 'C', long, global = true)]
    workspace: Option<PathBuf>,

    /// Override a configuration value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Toggle the hidden mark on a path
    Hide { path: PathBuf },
    /// Toggle the focused mark on a path
    Focus { path: PathBuf },
    /// Remove any mark from a path
    Reset { path: PathBuf },
    /// Turn hide mode on or off
    HideMode { state: Switch },
    /// Turn focus mode on or off
    FocusMode { state: Switch },
    /// Recompute exclusions from the current tree
    Refresh,
    /// Show modes and marked items
    Status,
    /// Show the badge of each path
    Decorate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Dispatch a host command id, e.g. treefocus.toggleHideItem
    Run {
        command_id: String,
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl Switch {
    const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

fn parse_overrides(raw: &[String]) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|pair| {
            let Some((key, value)) = pair.split_once('=') else {
                bail!("expected KEY=VALUE, got {pair:?}");
            };
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let workspace_dir = cli
        .workspace
        .as_deref()
        .map_or_else(|| cwd.clone(), |dir| normalize(&cwd, dir));

    let mut config = Config::load(&workspace_dir)
        .with_context(|| format!("failed to load configuration for {}", workspace_dir.display()))?;
    config.apply_overrides(&parse_overrides(&cli.overrides)?)?;

    treefocus::observability::init_tracing(&config);

    let span = tracing::debug_span!("cli", workspace = %workspace_dir.display());
    let _guard = span.entered();

    let mut state = initialize(&config, &workspace_dir).context("failed to open workspace state")?;
    let notifications = state.subscribe();
    let decorations = DecorationProvider::new(&mut state);
    state.sync_context();

    let command = match cli.command {
        Commands::Hide { path } => Command::ToggleHide(Some(normalize(&cwd, &path))),
        Commands::Focus { path } => Command::ToggleFocus(Some(normalize(&cwd, &path))),
        Commands::Reset { path } => Command::Reset(Some(normalize(&cwd, &path))),
        Commands::HideMode { state: switch } if switch.enabled() => Command::EnableHideMode,
        Commands::HideMode { .. } => Command::DisableHideMode,
        Commands::FocusMode { state: switch } if switch.enabled() => Command::EnableFocusMode,
        Commands::FocusMode { .. } => Command::DisableFocusMode,
        Commands::Refresh => Command::Refresh,
        Commands::Run { command_id, path } => {
            Command::parse(&command_id, path.map(|p| normalize(&cwd, &p)))?
        }
        Commands::Status => {
            print!("{}", render_status(&StatusViewModel::from_state(&state)));
            return Ok(());
        }
        Commands::Decorate { paths } => {
            print_decorations(&state, &decorations, &cwd, &paths);
            return Ok(());
        }
    };

    let outcome = handle_command(&mut state, &command)
        .with_context(|| format!("{} failed", command.id()))?;

    log_notifications(&notifications);
    for scope in decorations.pending_refreshes() {
        match scope {
            RefreshScope::All => tracing::debug!("refresh all decorations"),
            RefreshScope::Path(path) => tracing::debug!(path = %path.display(), "refresh decoration"),
        }
    }

    match outcome {
        Outcome::Applied => println!("{}: applied", command.id()),
        Outcome::Unchanged => println!("{}: unchanged", command.id()),
    }
    Ok(())
}

fn print_decorations(state: &WorkspaceState, decorations: &DecorationProvider, cwd: &Path, paths: &[PathBuf]) {
    for path in paths {
        let absolute = normalize(cwd, path);
        match decorations.decorate(state, &absolute) {
            Some(decoration) => println!("{decoration} {}", path.display()),
            None => println!("[ ] {}", path.display()),
        }
    }
}

fn log_notifications(notifications: &Receiver<Notification>) {
    for notification in notifications.try_iter() {
        match notification {
            Notification::ContextChanged { key, value } => {
                tracing::info!(key, value, "context flag");
            }
            Notification::DecorationsChanged(scope) => {
                tracing::debug!(scope = ?scope, "decorations changed");
            }
        }
    }
}
