//! Error types for the Flowboard plugin.
//!
//! Two families live here. [`LoadError`] describes why a dataset load attempt
//! failed and is what the error panel shows; it is serializable because the
//! background worker reports file-load failures back to the plugin thread.
//! [`FlowboardError`] is the plugin-level error returned by event handling and
//! initialization, wrapping [`LoadError`] among others.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single dataset load attempt.
///
/// Every variant is terminal for the attempt: nothing is retried
/// automatically and no partial data is kept.
///
/// # Examples
///
/// ```
/// use flowboard::domain::LoadError;
///
/// let err = LoadError::Http { status: 404 };
/// assert_eq!(err.to_string(), "HTTP error: 404");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LoadError {
    /// The server answered with a non-success status code.
    #[error("HTTP error: {status}")]
    Http {
        /// Status code returned by the server.
        status: u16,
    },

    /// The request never produced a response (DNS, connection refused, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The body was not a JSON array of categories with the expected fields.
    #[error("Malformed dataset: {0}")]
    Malformed(String),

    /// Reading the dataset file failed.
    #[error("Read error: {0}")]
    Io(String),

    /// The user refused the permissions needed to fetch or read the dataset.
    #[error("Permission denied: {0}")]
    Permission(String),
}

/// The main error type for Flowboard plugin operations.
#[derive(Debug, Error)]
pub enum FlowboardError {
    /// A dataset load failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Flowboard operations.
pub type Result<T> = std::result::Result<T, FlowboardError>;
