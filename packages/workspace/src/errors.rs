use flowcraft_renderer::RasterError;
use std::io;
use thiserror::Error;

/// Load/save failures, worded the way they are shown to the user
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File selection cancelled")]
    SelectionCancelled,

    #[error("File save cancelled")]
    SaveCancelled,

    #[error("Failed to read file: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to save file: {0}")]
    Write(#[source] io::Error),

    #[error("Could not determine app data directory")]
    NoAppDataDir,

    #[error("Failed to save state: {0}")]
    State(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format")]
    UnsupportedFormat(String),

    #[error("No rendered diagram to export")]
    NoArtifact,

    #[error("Export cancelled")]
    Cancelled,

    #[error("Failed to export: {0}")]
    Encode(#[from] RasterError),

    #[error("Failed to export: {0}")]
    Write(#[source] io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
