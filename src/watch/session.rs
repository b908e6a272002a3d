// src/watch/session.rs

//! Narrow interface to the OS notification layer.
//!
//! The watcher only needs four things from the platform: open a session,
//! register a directory with it, read its event and error streams, and close
//! it. [`Notifier`] and [`SessionHandle`] are that seam; [`NotifyNotifier`]
//! is the production implementation on top of `notify`.

use std::fmt;
use std::path::{Path, PathBuf};

use notify::{Config, ErrorKind, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::watch::event::RawEvent;

/// Raw events produced by a session, in arrival order.
pub type EventStream = mpsc::UnboundedReceiver<RawEvent>;

/// Errors reported by the notification layer while the session is live.
pub type ErrorStream = mpsc::UnboundedReceiver<notify::Error>;

/// Something that can open watch sessions.
pub trait Notifier: Send + Sync {
    fn new_session(&self) -> notify::Result<Session>;
}

/// Platform half of a session: registration and release.
pub trait SessionHandle: Send {
    fn watch(&mut self, dir: &Path) -> notify::Result<()>;
    fn close(&mut self) -> notify::Result<()>;
}

/// A live watch session and its two output streams.
///
/// The underlying handle is closed exactly once: either by an explicit
/// [`Session::close`] or when the session is dropped.
pub struct Session {
    handle: Box<dyn SessionHandle>,
    events: EventStream,
    errors: ErrorStream,
    closed: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(handle: Box<dyn SessionHandle>, events: EventStream, errors: ErrorStream) -> Self {
        Self {
            handle,
            events,
            errors,
            closed: false,
        }
    }

    /// Register a directory (non-recursively) with this session.
    pub fn watch(&mut self, dir: &Path) -> notify::Result<()> {
        self.handle.watch(dir)
    }

    /// Borrow both streams at once so they can be awaited side by side.
    pub fn streams(&mut self) -> (&mut EventStream, &mut ErrorStream) {
        (&mut self.events, &mut self.errors)
    }

    /// Release the OS watch. Later calls are no-ops.
    pub fn close(&mut self) -> notify::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.handle.close()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(error = %err, "failed to close watch session");
        }
    }
}

/// Production notifier backed by `notify::RecommendedWatcher`.
#[derive(Debug, Clone, Default)]
pub struct NotifyNotifier {
    config: Config,
}

impl Notifier for NotifyNotifier {
    fn new_session(&self) -> notify::Result<Session> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let (error_tx, error_rx) = mpsc::unbounded_channel::<notify::Error>();

        // Called synchronously on notify's own thread. A failed send means
        // the session side was dropped and the watcher is being torn down.
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for raw in RawEvent::from_notify(&event) {
                        let _ = event_tx.send(raw);
                    }
                }
                Err(err) => {
                    let _ = error_tx.send(err);
                }
            },
            self.config.clone(),
        )?;

        let handle = NotifyHandle {
            watcher: Some(watcher),
            watched: None,
        };
        Ok(Session::new(Box::new(handle), event_rx, error_rx))
    }
}

struct NotifyHandle {
    watcher: Option<RecommendedWatcher>,
    watched: Option<PathBuf>,
}

impl SessionHandle for NotifyHandle {
    fn watch(&mut self, dir: &Path) -> notify::Result<()> {
        let watcher = self
            .watcher
            .as_mut()
            .ok_or_else(|| notify::Error::generic("watch session already closed"))?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        self.watched = Some(dir.to_path_buf());
        Ok(())
    }

    fn close(&mut self) -> notify::Result<()> {
        // Dropping the watcher stops its thread and closes both streams.
        let Some(mut watcher) = self.watcher.take() else {
            return Ok(());
        };
        let Some(dir) = self.watched.take() else {
            return Ok(());
        };
        debug!(dir = ?dir, "unwatching directory");
        match watcher.unwatch(&dir) {
            Ok(()) => Ok(()),
            // A deleted directory takes its kernel watch with it.
            Err(err) if is_already_released(&err, &dir) => {
                debug!(dir = ?dir, error = %err, "watch already released");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

fn is_already_released(err: &notify::Error, dir: &Path) -> bool {
    matches!(err.kind, ErrorKind::WatchNotFound) || !dir.exists()
}
