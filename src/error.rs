//! Error types for the wordindex library.
//!
//! All errors are represented by the [`IndexError`] enum. Errors fall into
//! two groups: build-fatal errors such as [`IndexError::DirectoryAccess`],
//! which abort a build and are returned to the caller, and per-file errors
//! such as [`IndexError::FileRead`], which are collected in the build report
//! while the remaining files keep being indexed.
//!
//! # Examples
//!
//! ```
//! use wordindex::error::{IndexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(IndexError::invalid_config("worker_count must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The main error type for wordindex operations.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The directory to index does not exist or cannot be listed.
    #[error("Cannot access directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single file could not be read or decoded as UTF-8.
    #[error("Cannot read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Operation stopped because shutdown was requested.
    #[error("Operation interrupted: {0}")]
    Interrupted(String),

    /// Enqueue attempted on a closed file queue.
    #[error("File queue is closed")]
    QueueClosed,

    /// Invalid build configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Thread spawn or join errors
    #[error("Thread join error: {0}")]
    ThreadJoin(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Broken internal invariant.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that may fail with IndexError.
pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// Create a new directory access error.
    pub fn directory_access<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        IndexError::DirectoryAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new file read error.
    pub fn file_read<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        IndexError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new interrupted error.
    pub fn interrupted<S: Into<String>>(msg: S) -> Self {
        IndexError::Interrupted(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        IndexError::InvalidConfig(msg.into())
    }

    /// Create a new thread join error.
    pub fn thread_join<S: Into<String>>(msg: S) -> Self {
        IndexError::ThreadJoin(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        IndexError::Internal(msg.into())
    }

    /// The file or directory this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IndexError::DirectoryAccess { path, .. } | IndexError::FileRead { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
