//! Error types for the importer

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] station_core::StationError),

    #[error("Unsupported or unreadable audio file {path}: {reason}")]
    UnreadableMedia { path: PathBuf, reason: String },

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not find a free library name for {0}")]
    NameExhausted(String),
}
