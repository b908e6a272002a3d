// src/watch/target.rs

//! The watched file and the rule that decides which raw events are about it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::watch::event::{Op, RawEvent};

/// The single file being watched.
///
/// The watch itself is placed on [`WatchTarget::dir`], because editors that
/// save through a swap file replace the original inode and a file-level watch
/// would go silent after the first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    path: PathBuf,
    file_name: Option<OsString>,
    dir: PathBuf,
    canonical_dir: Option<PathBuf>,
}

impl WatchTarget {
    /// Build a target from a file path. Performs no I/O.
    ///
    /// A bare file name (e.g. `"notes.md"`) lives in `"."`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path.file_name().map(|name| name.to_os_string());

        Self {
            path,
            file_name,
            dir,
            canonical_dir: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that has to be watched to observe the file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve the canonical form of the watched directory.
    ///
    /// Some backends report event paths with a different absolute prefix
    /// than the one we registered (symlinked temp dirs on macOS, for
    /// instance). A directory that cannot be canonicalized keeps matching by
    /// its literal form only.
    pub fn resolve(mut self) -> Self {
        self.canonical_dir = self.dir.canonicalize().ok();
        self
    }

    /// Whether `path` names the watched file.
    ///
    /// Either a byte-equal path, or the same file name inside the watched
    /// directory (literal or canonical). Siblings never match.
    pub fn matches(&self, path: &Path) -> bool {
        if path == self.path {
            return true;
        }

        let Some(file_name) = self.file_name.as_deref() else {
            return false;
        };
        if path.file_name() != Some(file_name) {
            return false;
        }

        match path.parent() {
            Some(parent) if parent == self.dir => true,
            Some(parent) => self.canonical_dir.as_deref() == Some(parent),
            None => false,
        }
    }

    /// A raw event qualifies when it is about the target file and carries a
    /// write or a create. Either is enough; both still count once.
    pub fn is_qualifying(&self, event: &RawEvent) -> bool {
        event.op.intersects(Op::CHANGED) && self.matches(&event.path)
    }
}
