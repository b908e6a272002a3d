// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FilewatchError, Result};
use crate::types::RespawnPolicy;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = FilewatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let file = raw.watch.file.unwrap_or_default();
        let respawn = RespawnPolicy {
            enabled: raw.respawn.enabled,
            delay: Duration::from_millis(raw.respawn.delay_ms),
            max_attempts: raw.respawn.max_attempts,
        };
        Ok(ConfigFile::new_unchecked(
            file,
            raw.watch.channel_capacity,
            respawn,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_watch_section(cfg)?;
    validate_respawn_section(cfg)?;
    Ok(())
}

fn validate_watch_section(cfg: &RawConfigFile) -> Result<()> {
    match cfg.watch.file.as_deref() {
        None => {
            return Err(FilewatchError::ConfigError(
                "no file to watch: set [watch].file or pass FILE".to_string(),
            ));
        }
        Some(file) if file.as_os_str().is_empty() => {
            return Err(FilewatchError::ConfigError(
                "[watch].file must not be empty".to_string(),
            ));
        }
        Some(file) if file.file_name().is_none() => {
            return Err(FilewatchError::ConfigError(format!(
                "[watch].file must name a file, got {:?}",
                file
            )));
        }
        Some(_) => {}
    }

    if cfg.watch.channel_capacity == 0 {
        return Err(FilewatchError::ConfigError(
            "[watch].channel_capacity must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_respawn_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.respawn.max_attempts == Some(0) {
        return Err(FilewatchError::ConfigError(
            "[respawn].max_attempts must be >= 1 when set (got 0)".to_string(),
        ));
    }
    Ok(())
}
