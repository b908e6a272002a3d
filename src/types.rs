use std::time::Duration;

/// When to start a new watch after the previous one died.
///
/// Attempts count every run, including the first one. `max_attempts = None`
/// means respawn forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnPolicy {
    pub enabled: bool,
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl RespawnPolicy {
    /// Never respawn; the first failure ends supervision.
    pub fn never() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether another run may start after `attempts` runs have ended.
    pub fn allows_another(&self, attempts: u32) -> bool {
        if !self.enabled {
            return false;
        }
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }
}

impl Default for RespawnPolicy {
    fn default() -> Self {
        RespawnPolicy {
            enabled: true,
            delay: Duration::from_millis(500),
            max_attempts: None,
        }
    }
}
