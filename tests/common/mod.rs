#![allow(dead_code)]

use std::time::Duration;

use tokio::sync::mpsc;

pub use filewatch_test_utils::builders;
pub use filewatch_test_utils::fake_notifier::{FakeNotifier, SessionControl};
pub use filewatch_test_utils::{init_tracing, with_timeout};

/// Give a spawned watcher time to reach its wait loop.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Assert that nothing arrives on `rx` within `wait`.
pub async fn assert_quiet(rx: &mut mpsc::Receiver<bool>, wait: Duration) {
    match tokio::time::timeout(wait, rx.recv()).await {
        Err(_) => {}
        Ok(Some(v)) => panic!("unexpected change signal: {v}"),
        Ok(None) => panic!("change channel closed unexpectedly"),
    }
}

/// Drain everything currently buffered on `rx`.
pub fn drain(rx: &mut mpsc::Receiver<bool>) -> Vec<bool> {
    let mut out = Vec::new();
    while let Ok(v) = rx.try_recv() {
        out.push(v);
    }
    out
}
