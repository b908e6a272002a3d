use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use filewatch::watch::{Notifier, Op, RawEvent, Session, SessionHandle};
use tokio::sync::mpsc;

/// Test-side controls for one fake session.
///
/// Dropping `events` or `errors` closes the corresponding stream as seen by
/// the watcher.
pub struct SessionControl {
    pub events: Option<mpsc::UnboundedSender<RawEvent>>,
    pub errors: Option<mpsc::UnboundedSender<notify::Error>>,
}

impl SessionControl {
    pub fn send(&self, path: impl Into<PathBuf>, op: Op) {
        self.events
            .as_ref()
            .expect("event stream already closed")
            .send(RawEvent::new(path, op))
            .expect("watcher dropped its event stream");
    }

    pub fn fail(&self, err: notify::Error) {
        self.errors
            .as_ref()
            .expect("error stream already closed")
            .send(err)
            .expect("watcher dropped its error stream");
    }

    pub fn close_events(&mut self) {
        self.events = None;
    }

    pub fn close_errors(&mut self) {
        self.errors = None;
    }
}

/// Counters shared between a [`FakeNotifier`] and its sessions.
#[derive(Debug, Default)]
pub struct FakeStats {
    opens: AtomicUsize,
    closes: AtomicUsize,
    watched: Mutex<Vec<PathBuf>>,
}

impl FakeStats {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn watched(&self) -> Vec<PathBuf> {
        self.watched.lock().unwrap().clone()
    }
}

/// A notifier whose sessions are driven by the test.
///
/// Every successful `new_session` publishes a [`SessionControl`] on the
/// receiver returned by [`FakeNotifier::new`].
#[derive(Clone)]
pub struct FakeNotifier {
    controls: mpsc::UnboundedSender<SessionControl>,
    stats: Arc<FakeStats>,
    failing_opens: Arc<AtomicUsize>,
    fail_watch: bool,
}

impl FakeNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionControl>) {
        let (controls, controls_rx) = mpsc::unbounded_channel();
        let notifier = Self {
            controls,
            stats: Arc::new(FakeStats::default()),
            failing_opens: Arc::new(AtomicUsize::new(0)),
            fail_watch: false,
        };
        (notifier, controls_rx)
    }

    /// Make the next `n` calls to `new_session` fail.
    pub fn failing_opens(self, n: usize) -> Self {
        self.failing_opens.store(n, Ordering::SeqCst);
        self
    }

    /// Make directory registration fail, as for a missing directory.
    pub fn failing_watch(mut self) -> Self {
        self.fail_watch = true;
        self
    }

    pub fn stats(&self) -> Arc<FakeStats> {
        Arc::clone(&self.stats)
    }
}

impl Notifier for FakeNotifier {
    fn new_session(&self) -> notify::Result<Session> {
        let should_fail = self
            .failing_opens
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(notify::Error::generic("fake: cannot open session"));
        }

        self.stats.opens.fetch_add(1, Ordering::SeqCst);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        // The test may not care about this session's controls.
        let _ = self.controls.send(SessionControl {
            events: Some(events_tx),
            errors: Some(errors_tx),
        });

        let handle = FakeHandle {
            stats: Arc::clone(&self.stats),
            fail_watch: self.fail_watch,
        };
        Ok(Session::new(Box::new(handle), events_rx, errors_rx))
    }
}

struct FakeHandle {
    stats: Arc<FakeStats>,
    fail_watch: bool,
}

impl SessionHandle for FakeHandle {
    fn watch(&mut self, dir: &Path) -> notify::Result<()> {
        if self.fail_watch {
            return Err(notify::Error::path_not_found().add_path(dir.to_path_buf()));
        }
        self.stats.watched.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }

    fn close(&mut self) -> notify::Result<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
