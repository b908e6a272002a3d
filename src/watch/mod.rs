// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Translating `notify` events into path + operation pairs (`event`).
//! - Deciding which of those events mean "the target file changed" (`target`).
//! - Owning the OS watch session and releasing it on every exit (`session`).
//! - The run loop tying them together (`watcher`).
//!
//! It does **not** retry or respawn; that is the caller's job (see
//! [`crate::supervise`]).

pub mod event;
pub mod session;
pub mod target;
pub mod watcher;

pub use event::{Op, RawEvent};
pub use session::{ErrorStream, EventStream, Notifier, NotifyNotifier, Session, SessionHandle};
pub use target::WatchTarget;
pub use watcher::FileWatcher;
