// Error types for the obfuscation pipeline
//
// Structural failures (scan, parse, path resolution) abort a run. Engine
// rejections of a single candidate are carried as `RenameError` and recovered
// by the pipeline; they only surface here when a caller wants to propagate one.

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::RenameError;

/// Errors that abort an obfuscation run
#[derive(Error, Debug)]
pub enum ObfuscateError {
    /// Tree traversal or file I/O failed
    #[error("Failed to scan '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A compilation unit could not be parsed cleanly
    #[error("Failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    /// A path could not be expressed relative to the tree root
    #[error("Path '{path}' is not within source root '{root}'")]
    PathResolution { path: PathBuf, root: PathBuf },

    /// The rename engine rejected an operation
    #[error("Rename failed: {0}")]
    RenameApply(#[from] RenameError),

    /// The reverse lookup map could not be written
    #[error("Failed to persist reverse map '{path}': {reason}")]
    Persist { path: PathBuf, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ObfuscateError {
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ObfuscateError::Scan {
            path: path.into(),
            source,
        }
    }

    /// A directory walk failed; reports the entry it failed on when known
    pub fn walk(root: &std::path::Path, error: walkdir::Error) -> Self {
        let path = error.path().unwrap_or(root).to_path_buf();
        ObfuscateError::Scan {
            path,
            source: error.into(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ObfuscateError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ObfuscateError>;
