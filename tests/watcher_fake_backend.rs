// tests/watcher_fake_backend.rs

mod common;
use crate::common::{assert_quiet, drain, init_tracing, settle, with_timeout, FakeNotifier};

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;

use filewatch::errors::WatchError;
use filewatch::watch::{FileWatcher, Op};

const TARGET: &str = "/w/notes.md";

fn spawn_watcher(
    notifier: FakeNotifier,
    capacity: usize,
) -> (
    tokio::task::JoinHandle<WatchError>,
    mpsc::Receiver<bool>,
) {
    let (tx, rx) = mpsc::channel(capacity);
    let watcher = FileWatcher::with_notifier(TARGET, tx, notifier);
    let handle = tokio::spawn(async move {
        match watcher.run().await {
            Ok(never) => match never {},
            Err(err) => err,
        }
    });
    (handle, rx)
}

#[tokio::test]
async fn test_watches_parent_directory() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let stats = notifier.stats();
        let (_handle, _rx) = spawn_watcher(notifier, 8);

        let _control = controls.recv().await.unwrap();
        settle().await;

        assert_eq!(stats.opens(), 1);
        assert_eq!(stats.watched(), vec![PathBuf::from("/w")]);
    })
    .await;
}

#[tokio::test]
async fn test_vim_style_save_signals_once() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let (_handle, mut rx) = spawn_watcher(notifier, 8);
        let control = controls.recv().await.unwrap();

        control.send("/w/.notes.md.swp", Op::CREATE);
        control.send(TARGET, Op::CREATE);

        assert_eq!(rx.recv().await, Some(true));
        assert_quiet(&mut rx, Duration::from_millis(100)).await;
    })
    .await;
}

#[tokio::test]
async fn test_vscode_style_save_signals_once() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let (_handle, mut rx) = spawn_watcher(notifier, 8);
        let control = controls.recv().await.unwrap();

        control.send(TARGET, Op::WRITE);
        control.send(TARGET, Op::CHMOD);

        assert_eq!(rx.recv().await, Some(true));
        assert_quiet(&mut rx, Duration::from_millis(100)).await;
    })
    .await;
}

#[tokio::test]
async fn test_each_qualifying_event_signals() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let (_handle, mut rx) = spawn_watcher(notifier, 8);
        let control = controls.recv().await.unwrap();

        // Write and Create from one save are not merged.
        control.send(TARGET, Op::WRITE);
        control.send(TARGET, Op::CREATE);
        control.send(TARGET, Op::WRITE | Op::CREATE);
        control.send(TARGET, Op::REMOVE);
        control.send("/w/other.md", Op::WRITE);

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(true));
        }
        assert_quiet(&mut rx, Duration::from_millis(100)).await;
    })
    .await;
}

#[tokio::test]
async fn test_full_channel_applies_backpressure_without_loss() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let (handle, mut rx) = spawn_watcher(notifier, 1);
        let control = controls.recv().await.unwrap();

        for _ in 0..4 {
            control.send(TARGET, Op::WRITE);
        }
        settle().await;

        // Only one fits; the loop is parked on the second send.
        assert_eq!(drain(&mut rx), vec![true]);
        assert!(!handle.is_finished());

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(true));
        }
        assert_quiet(&mut rx, Duration::from_millis(100)).await;
    })
    .await;
}

#[tokio::test]
async fn test_session_open_failure_is_setup_error() {
    with_timeout(async {
        init_tracing();
        let (notifier, _controls) = FakeNotifier::new();
        let notifier = notifier.failing_opens(1);
        let stats = notifier.stats();
        let (handle, mut rx) = spawn_watcher(notifier, 8);

        let err = handle.await.unwrap();
        assert!(matches!(err, WatchError::Setup(_)), "got {err:?}");
        assert!(err.to_string().starts_with("error watching for changes"));
        assert_eq!(stats.opens(), 0);
        assert_eq!(stats.closes(), 0);
        assert!(drain(&mut rx).is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_directory_registration_failure_releases_session() {
    with_timeout(async {
        init_tracing();
        let (notifier, _controls) = FakeNotifier::new();
        let notifier = notifier.failing_watch();
        let stats = notifier.stats();
        let (handle, mut rx) = spawn_watcher(notifier, 8);

        let err = handle.await.unwrap();
        assert!(matches!(err, WatchError::Setup(_)), "got {err:?}");
        assert_eq!(stats.opens(), 1);
        assert_eq!(stats.closes(), 1);
        assert!(drain(&mut rx).is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_event_stream_closed() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let stats = notifier.stats();
        let (handle, mut rx) = spawn_watcher(notifier, 8);
        let mut control = controls.recv().await.unwrap();

        control.close_events();

        let err = handle.await.unwrap();
        assert!(matches!(err, WatchError::StreamClosed), "got {err:?}");
        assert_eq!(err.to_string(), "something is weird with the file watcher");
        assert_eq!(stats.closes(), 1);
        assert!(drain(&mut rx).is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_runtime_error_is_wrapped() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let stats = notifier.stats();
        let (handle, _rx) = spawn_watcher(notifier, 8);
        let control = controls.recv().await.unwrap();

        let io = std::io::Error::new(std::io::ErrorKind::Other, "queue overflow");
        control.fail(notify::Error::io(io));

        let err = handle.await.unwrap();
        match &err {
            WatchError::Runtime(cause) => {
                assert!(cause.to_string().contains("queue overflow"));
            }
            other => panic!("expected Runtime error, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(stats.closes(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_error_stream_closed() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let stats = notifier.stats();
        let (handle, _rx) = spawn_watcher(notifier, 8);
        let mut control = controls.recv().await.unwrap();

        control.close_errors();

        let err = handle.await.unwrap();
        assert!(matches!(err, WatchError::ErrorStreamClosed), "got {err:?}");
        assert_eq!(
            err.to_string(),
            "something is weird with the file watcher around error handling"
        );
        assert_eq!(stats.closes(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_dropped_receiver_ends_run() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let stats = notifier.stats();
        let (handle, rx) = spawn_watcher(notifier, 8);
        let control = controls.recv().await.unwrap();

        drop(rx);
        control.send(TARGET, Op::WRITE);

        let err = handle.await.unwrap();
        assert!(matches!(err, WatchError::SignalChannelClosed), "got {err:?}");
        assert_eq!(stats.closes(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_aborting_run_releases_session_once() {
    with_timeout(async {
        init_tracing();
        let (notifier, mut controls) = FakeNotifier::new();
        let stats = notifier.stats();
        let (handle, _rx) = spawn_watcher(notifier, 8);
        let _control = controls.recv().await.unwrap();
        settle().await;

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert_eq!(stats.closes(), 1);
    })
    .await;
}
