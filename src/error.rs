//! Error types for the gitinfo crate.
//!
//! Only root-level failures are represented here. Problems with individual
//! files or entries below the root are recovered where they happen and never
//! surface as a `GitinfoError`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gitinfo operations.
#[derive(Error, Debug)]
pub enum GitinfoError {
    /// Cloning the remote repository failed.
    #[error("Failed to clone '{url}': {message}")]
    GitClone {
        /// The repository source that was passed to `git clone`.
        url: String,
        /// Description of what went wrong.
        message: String,
        /// The underlying IO error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Error reading a path.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The path that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The analysis root does not exist or is not a directory.
    #[error("The path {path} is not a valid directory")]
    NotADirectory {
        /// The offending root path.
        path: PathBuf,
    },

    /// Traversing the analysis root failed.
    #[error("Failed to traverse '{path}': {source}")]
    Walk {
        /// The root being traversed.
        path: PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// The scan worker pool could not be started.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized Result type for gitinfo operations.
pub type Result<T> = std::result::Result<T, GitinfoError>;

impl GitinfoError {
    /// Creates a new clone error with a message.
    pub fn clone_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GitClone {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new clone error with a message and source error.
    pub fn clone_with_source(
        url: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::GitClone {
            url: url.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new not-a-directory error.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Creates a new traversal error.
    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }
}
