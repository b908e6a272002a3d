// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::RespawnPolicy;

/// Configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// file = "notes.md"
/// channel_capacity = 16
///
/// [respawn]
/// enabled = true
/// delay_ms = 500
/// max_attempts = 10
/// ```
///
/// All sections are optional; `watch.file` may also come from the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub respawn: RespawnSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// File to watch. Relative paths are taken from the working directory.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Capacity of the change-signal channel between watcher and consumer.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    16
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            file: None,
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// `[respawn]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RespawnSection {
    #[serde(default = "default_respawn_enabled")]
    pub enabled: bool,

    /// Pause before starting a new watch, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Total number of runs allowed, first one included. Unset = unlimited.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

fn default_respawn_enabled() -> bool {
    true
}

fn default_delay_ms() -> u64 {
    500
}

impl Default for RespawnSection {
    fn default() -> Self {
        Self {
            enabled: default_respawn_enabled(),
            delay_ms: default_delay_ms(),
            max_attempts: None,
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    file: PathBuf,
    channel_capacity: usize,
    respawn: RespawnPolicy,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        file: PathBuf,
        channel_capacity: usize,
        respawn: RespawnPolicy,
    ) -> Self {
        Self {
            file,
            channel_capacity,
            respawn,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn respawn(&self) -> RespawnPolicy {
        self.respawn
    }
}
