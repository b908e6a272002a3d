// src/watch/watcher.rs

use std::convert::Infallible;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::errors::WatchError;
use crate::watch::session::{Notifier, NotifyNotifier};
use crate::watch::target::WatchTarget;

/// Watches one file through its parent directory and sends `true` on
/// `changes` each time the file is written or (re)created.
///
/// The directory is watched instead of the file because editors do not all
/// write in place:
/// - vim writes a swap file and then creates the real file again, so the
///   `Create` on the target path is the change;
/// - VS Code writes the file and then changes its permissions, so the
///   `Write` is the change and the trailing chmod is ignored.
///
/// Each qualifying raw event produces one signal. Several qualifying events
/// from one save are not merged.
#[derive(Debug)]
pub struct FileWatcher<N: Notifier = NotifyNotifier> {
    target: WatchTarget,
    changes: mpsc::Sender<bool>,
    notifier: N,
}

impl FileWatcher<NotifyNotifier> {
    /// Watcher backed by the platform's recommended `notify` backend.
    pub fn new(path: impl Into<PathBuf>, changes: mpsc::Sender<bool>) -> Self {
        Self::with_notifier(path, changes, NotifyNotifier::default())
    }
}

impl<N: Notifier> FileWatcher<N> {
    pub fn with_notifier(
        path: impl Into<PathBuf>,
        changes: mpsc::Sender<bool>,
        notifier: N,
    ) -> Self {
        Self {
            target: WatchTarget::new(path),
            changes,
            notifier,
        }
    }

    /// Run until the watch dies.
    ///
    /// There is no voluntary exit: the returned error says why the watch
    /// stopped, and whether to start a new one is up to the caller. Dropping
    /// the future releases the watch as well.
    pub async fn run(&self) -> Result<Infallible, WatchError> {
        let mut session = self.notifier.new_session().map_err(WatchError::Setup)?;
        session
            .watch(self.target.dir())
            .map_err(WatchError::Setup)?;

        let target = self.target.clone().resolve();
        info!(file = ?target.path(), dir = ?target.dir(), "file watcher started");

        let (events, errors) = session.streams();
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        return Err(WatchError::StreamClosed);
                    };

                    if !target.is_qualifying(&event) {
                        trace!(path = ?event.path, op = ?event.op, "ignoring event");
                        continue;
                    }

                    debug!(path = ?event.path, op = ?event.op, "target changed");
                    self.changes
                        .send(true)
                        .await
                        .map_err(|_| WatchError::SignalChannelClosed)?;
                }
                err = errors.recv() => {
                    return Err(match err {
                        Some(err) => WatchError::Runtime(err),
                        None => WatchError::ErrorStreamClosed,
                    });
                }
            }
        }
    }
}
