#![allow(dead_code)]

use std::path::PathBuf;

use filewatch::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let mut config = RawConfigFile::default();
        config.watch.file = Some(file.into());
        Self { config }
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.watch.channel_capacity = capacity;
        self
    }

    pub fn respawn(mut self, enabled: bool) -> Self {
        self.config.respawn.enabled = enabled;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.respawn.delay_ms = delay_ms;
        self
    }

    pub fn max_attempts(mut self, max: u32) -> Self {
        self.config.respawn.max_attempts = Some(max);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}
