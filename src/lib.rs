// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod supervise;
pub mod types;
pub mod watch;

use std::path::Path;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_config_path, load_from_path, ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::supervise::Supervisor;
use crate::watch::NotifyNotifier;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the change-signal channel and its consumer
/// - the supervised file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;

    let (changes_tx, mut changes_rx) = mpsc::channel::<bool>(cfg.channel_capacity());

    // Consumer: one line on stdout per change signal.
    let printed = cfg.file().display().to_string();
    let printer = tokio::spawn(async move {
        while let Some(changed) = changes_rx.recv().await {
            if changed {
                println!("changed: {printed}");
            }
        }
        debug!("change consumer finished");
    });

    let supervisor = Supervisor::new(
        cfg.file(),
        NotifyNotifier::default(),
        cfg.respawn(),
        changes_tx,
    );

    // Dropping the supervisor future on Ctrl-C drops the live session,
    // which releases the OS watch.
    tokio::select! {
        res = supervisor.run() => res?,
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Ctrl+C received; stopping file watcher");
        }
    }

    printer.abort();
    Ok(())
}

/// Build the effective configuration.
///
/// An explicit `--config` must exist; the default `Filewatch.toml` is only
/// read when present. CLI flags then override file values.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    resolve_config_with_default(args, &default_config_path())
}

/// [`resolve_config`] with the fallback config location made explicit.
pub fn resolve_config_with_default(args: &CliArgs, default_path: &Path) -> Result<ConfigFile> {
    let mut raw = match args.config.as_deref() {
        Some(path) => load_from_path(path)?,
        None => load_default_if_present(default_path)?,
    };

    apply_cli_overrides(&mut raw, args);
    ConfigFile::try_from(raw)
}

fn load_default_if_present(path: &Path) -> Result<RawConfigFile> {
    if path.is_file() {
        debug!(path = ?path, "loading default config");
        load_from_path(path)
    } else {
        Ok(RawConfigFile::default())
    }
}

/// Apply command-line values on top of a raw config.
pub fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(ref file) = args.file {
        raw.watch.file = Some(file.clone());
    }
    if let Some(capacity) = args.channel_capacity {
        raw.watch.channel_capacity = capacity;
    }
    if args.no_respawn {
        raw.respawn.enabled = false;
    }
    if let Some(delay_ms) = args.respawn_delay_ms {
        raw.respawn.delay_ms = delay_ms;
    }
    if let Some(max_attempts) = args.max_attempts {
        raw.respawn.max_attempts = Some(max_attempts);
    }
}
