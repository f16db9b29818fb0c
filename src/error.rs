//! Error types for staging, manifest patching, and build invocation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all harness operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO errors carrying the operation and the path it failed on
    #[error("{action} {}: {source}", .path.display())]
    Fs {
        /// What was being done when the error occurred
        action: String,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON errors from manifest parsing or serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A named library could not be found on the system search path
    #[error("library not found: {name}")]
    LibraryNotFound {
        /// Library name as given in the resource list
        name: String,
    },

    /// A staged copy does not hash to the same digest as its source
    #[error("staged copy {} does not match its source", .path.display())]
    ChecksumMismatch {
        /// Path of the staged copy
        path: PathBuf,
    },

    /// The manifest is valid JSON but is missing a required object
    #[error("manifest {} has no {detail}", .path.display())]
    ManifestShape {
        /// Manifest path
        path: PathBuf,
        /// The object or array that was expected
        detail: String,
    },

    /// A manifest backup is already present, so a previous run did not restore
    #[error("manifest backup already exists at {}; restore it first (--clean-only)", .path.display())]
    BackupExists {
        /// Backup path
        path: PathBuf,
    },

    /// No manifest backup to restore from
    #[error("manifest backup not found at {}; nothing to restore", .path.display())]
    BackupMissing {
        /// Backup path
        path: PathBuf,
    },

    /// An external tool could not be spawned at all
    #[error("failed to execute {program}: {source}")]
    ToolSpawn {
        /// Program that failed to start
        program: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// An external tool ran but exited unsuccessfully
    #[error("{command} failed with exit code {code:?}: {stderr}")]
    ToolFailed {
        /// Full command line that failed
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Captured stderr
        stderr: String,
    },

    /// No build artifact matched the expected pattern
    #[error("no disk image matching {pattern}")]
    ArtifactMissing {
        /// Glob pattern that produced no matches
        pattern: String,
    },

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::GenericError(format!($($arg)*)))
    };
}

/// Extension trait for attaching a message to `Option` values
pub trait Context<T> {
    /// Convert `None` into a [`Error::GenericError`] with the given message
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Extension trait for attaching path context to IO results
pub trait ErrorExt<T> {
    /// Wrap an IO error with the operation and the path it failed on
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
