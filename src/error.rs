//! Error types shared by the library index, metadata reader and organizer.
//!
//! Per-file errors (`ReadError`, `TransferError`) are collected into reports
//! and never abort a batch. `LibraryError` and `PlanError` are the fatal ones.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reading or writing the tags of a single file failed.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("unsupported format: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write tags to {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("no track indexed for {}", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a readable directory", .0.display())]
    InvalidRoot(PathBuf),
}

/// The plan could not be built, or its destination cannot be written to.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("destination root is empty")]
    EmptyDestination,

    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("{} is listed more than once", .0.display())]
    DuplicateSource(PathBuf),

    #[error("destination {} is not writable: {reason}", path.display())]
    DestinationUnwritable { path: PathBuf, reason: String },
}

/// Why a single plan entry was not transferred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("source is missing: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("cancelled before transfer")]
    Cancelled,

    #[error("{message}")]
    Io { kind: io::ErrorKind, message: String },
}

impl From<io::Error> for TransferError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no config path available (set DUBDIB_CONFIG_PATH or HOME)")]
    NoConfigPath,

    #[error("invalid settings: {0}")]
    Invalid(String),
}
