// src/watch/event.rs

//! Raw directory events as the classifier sees them.
//!
//! `notify` describes changes with a nested `EventKind` and may attach more
//! than one path to an event. The classifier only needs "which path" and
//! "which operations", so every `notify::Event` is flattened into one
//! [`RawEvent`] per path carrying an [`Op`] bitmask.

use std::path::PathBuf;

use bitflags::bitflags;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

bitflags! {
    /// Operations observed on a path.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Op: u8 {
        const CREATE = 1 << 0;
        const WRITE = 1 << 1;
        const REMOVE = 1 << 2;
        const RENAME = 1 << 3;
        const CHMOD = 1 << 4;
    }
}

impl Op {
    /// Operations that count as "the file changed".
    pub const CHANGED: Op = Op::WRITE.union(Op::CREATE);

    /// Map a single `notify` event kind onto an operation set.
    ///
    /// A rename into a path is reported as `CREATE` (the file appeared under
    /// that name); a rename away is `RENAME`. The aggregated
    /// `RenameMode::Both` event repeats a `From`/`To` pair that was already
    /// delivered, so it maps to nothing.
    pub fn from_kind(kind: &EventKind) -> Op {
        match kind {
            EventKind::Create(_) => Op::CREATE,
            EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Other) => Op::WRITE,
            EventKind::Modify(ModifyKind::Metadata(_)) => Op::CHMOD,
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Op::CREATE,
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => Op::empty(),
            EventKind::Modify(ModifyKind::Name(_)) => Op::RENAME,
            EventKind::Remove(_) => Op::REMOVE,
            EventKind::Access(_) | EventKind::Any | EventKind::Other => Op::empty(),
        }
    }
}

/// One path plus the operations observed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub path: PathBuf,
    pub op: Op,
}

impl RawEvent {
    pub fn new(path: impl Into<PathBuf>, op: Op) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }

    /// Flatten a `notify::Event` into per-path raw events.
    ///
    /// Events whose kind maps to no operation yield nothing.
    pub fn from_notify(event: &Event) -> Vec<RawEvent> {
        let op = Op::from_kind(&event.kind);
        if op.is_empty() {
            return Vec::new();
        }

        event
            .paths
            .iter()
            .map(|path| RawEvent::new(path.clone(), op))
            .collect()
    }
}
