//! Error types for Gist operations.
//!
//! This module defines the main error type [`GistError`] which represents
//! everything that can stop a summarization run: rejected input and failed
//! fetches. A page that yields no usable text is *not* an error; it produces
//! an empty [`Summary`](crate::Summary).
//!
//! # Example
//!
//! ```rust
//! use gist_core::{GistError, Result};
//!
//! fn sentence_count(n: usize) -> Result<usize> {
//!     if n == 0 {
//!         return Err(GistError::InvalidSentenceCount(n));
//!     }
//!     Ok(n)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching and summarization.
///
/// Variants fall into two kinds: invalid input (bad URL, bad sentence count,
/// missing file) and fetch failures (timeout, connection, bad status). Every
/// fetch variant names the URL it was fetching.
///
/// # Example
///
/// ```rust
/// use gist_core::GistError;
///
/// let err = GistError::BadStatus { url: "https://example.com/missing".into(), status: 404 };
/// assert!(err.is_fetch_error());
/// assert!(err.to_string().contains("404"));
/// ```
#[derive(Error, Debug)]
pub enum GistError {
    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Requested summary length is not positive.
    #[error("Sentence count must be at least 1 (got {0})")]
    InvalidSentenceCount(usize),

    /// Local input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request to '{url}' timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },

    /// Network-level failure: DNS, refused connection, TLS, broken body.
    #[cfg(feature = "fetch")]
    #[error("Network error while fetching '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status outside the 2xx range.
    #[error("Unexpected status code {status} while fetching '{url}'")]
    BadStatus { url: String, status: u16 },

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GistError {
    /// Whether this error came from the network layer.
    pub fn is_fetch_error(&self) -> bool {
        match self {
            GistError::Timeout { .. } | GistError::BadStatus { .. } => true,
            #[cfg(feature = "fetch")]
            GistError::Connection { .. } => true,
            _ => false,
        }
    }

    /// Whether this error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            GistError::InvalidUrl { .. } | GistError::InvalidSentenceCount(_) | GistError::FileNotFound(_)
        )
    }
}

/// Result type alias for GistError.
pub type Result<T> = std::result::Result<T, GistError>;
