//! Error types for loading keys from external sources.
//!
//! Tree operations themselves never fail; a missing key is reported as an
//! absent result.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading keys.
#[derive(Error, Debug)]
pub enum Error {
    /// Key file could not be opened
    #[error("cannot open key file {path}: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading failed partway through the input
    #[error("read error at line {line}: {source}")]
    Read {
        /// 1-based number of the line being read.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
