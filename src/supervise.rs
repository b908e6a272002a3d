// src/supervise.rs

//! Respawn loop around [`FileWatcher`].
//!
//! A watcher run always ends in an error. The supervisor decides, per
//! [`RespawnPolicy`], whether to start another one.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::errors::WatchError;
use crate::types::RespawnPolicy;
use crate::watch::{FileWatcher, Notifier};

#[derive(Debug)]
pub struct Supervisor<N: Notifier + Clone> {
    path: PathBuf,
    notifier: N,
    policy: RespawnPolicy,
    changes: mpsc::Sender<bool>,
}

impl<N: Notifier + Clone> Supervisor<N> {
    pub fn new(
        path: impl Into<PathBuf>,
        notifier: N,
        policy: RespawnPolicy,
        changes: mpsc::Sender<bool>,
    ) -> Self {
        Self {
            path: path.into(),
            notifier,
            policy,
            changes,
        }
    }

    /// Keep a watch alive on the file.
    ///
    /// Returns `Ok(())` once the receiving side of `changes` is gone, and the
    /// last watch error once the policy allows no further attempts.
    pub async fn run(self) -> Result<(), WatchError> {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let watcher = FileWatcher::with_notifier(
                &self.path,
                self.changes.clone(),
                self.notifier.clone(),
            );

            let err = match watcher.run().await {
                Ok(never) => match never {},
                Err(err) => err,
            };

            if matches!(err, WatchError::SignalChannelClosed) {
                info!(file = ?self.path, "change consumer went away; stopping watcher");
                return Ok(());
            }

            if !self.policy.allows_another(attempts) {
                error!(
                    file = ?self.path,
                    attempts,
                    error = %err,
                    "file watcher died; giving up"
                );
                return Err(err);
            }

            warn!(
                file = ?self.path,
                attempt = attempts,
                error = %err,
                delay = ?self.policy.delay,
                "file watcher died; respawning"
            );
            tokio::time::sleep(self.policy.delay).await;
        }
    }
}
