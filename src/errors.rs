use std::path::PathBuf;

use thiserror::Error;

/// Failures of the saved password store. Backend details are flattened into
/// a message so callers only see success or one of these kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("password store unavailable: {0}")]
    Unavailable(String),

    #[error("password store is corrupt: {0}")]
    Corrupt(String),

    #[error("password store full: {needed} bytes needed, capacity is {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(format!("I/O error: {}", e))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("password length must be between {min} and {max}, got {length}")]
    LengthOutOfRange { length: usize, min: usize, max: usize },

    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard provider available")]
    NoProvider,

    #[error("could not set clipboard contents: {0}")]
    Set(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("no password saved under '{0}'")]
    UnknownLabel(String),

    #[error("no data directory found, set store_path in the config file")]
    NoDataDir,
}
