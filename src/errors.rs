// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

/// Why a single watch run ended.
///
/// A run never ends successfully, so every exit is one of these. None of
/// them are retried by the watcher itself.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("error watching for changes: {0}")]
    Setup(#[source] notify::Error),

    #[error("something is weird with the file watcher")]
    StreamClosed,

    #[error("error in file watcher: {0}")]
    Runtime(#[source] notify::Error),

    #[error("something is weird with the file watcher around error handling")]
    ErrorStreamClosed,

    #[error("change signal receiver was dropped")]
    SignalChannelClosed,
}

#[derive(Error, Debug)]
pub enum FilewatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

pub type Result<T> = std::result::Result<T, FilewatchError>;
