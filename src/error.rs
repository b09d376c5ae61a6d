//! Error types for cache-sweep.
//!
//! This module defines all error types used throughout cache-sweep, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`SweepError`]
//! - Per-path failures during a sweep are never propagated; they are recorded
//!   in the [`SweepReport`](crate::sweep::SweepReport) and the run continues
//! - Only startup problems (bad root directory, invalid rule table) reach
//!   `main`, where they are rendered by miette
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cache_sweep::error::{Result, SweepError};
//!
//! fn check_root(path: &Path) -> Result<()> {
//!     if !path.is_dir() {
//!         return Err(SweepError::ConfigError(format!(
//!             "root '{}' is not a directory",
//!             path.display()
//!         )));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in cache-sweep operations
#[derive(Error, Debug, Diagnostic)]
pub enum SweepError {
    /// File system I/O error while listing or removing a path.
    ///
    /// Common causes: permission denied, read-only file systems, or a path
    /// that is busy. A missing path is never reported through this variant;
    /// removal treats `NotFound` as success.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(
        code(cache_sweep::io_error),
        help("Check that you have write permission for the path and its parent directory.")
    )]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A rule pattern is not a valid glob.
    ///
    /// Raised when a rule table is built with a malformed pattern, or when
    /// home/environment expansion turns a pattern into one the glob parser
    /// rejects (for example an unbalanced `[`).
    #[error("Invalid glob pattern '{pattern}'")]
    #[diagnostic(
        code(cache_sweep::rules::invalid_pattern),
        help("Patterns use glob syntax: '*', '?', '[...]' and '**' for recursive matches.")
    )]
    InvalidPattern {
        /// The offending pattern, after expansion
        pattern: String,
        /// The underlying glob parse error
        #[source]
        source: glob::PatternError,
    },

    /// Invalid configuration passed to the engine or CLI builder.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(cache_sweep::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError(
        /// Description of the configuration error
        String,
    ),
}

impl SweepError {
    /// The path this error is about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SweepError::IoError { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SweepError>;
