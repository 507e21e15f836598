//! Error types for the IPTV Gateway application
//!
//! Nothing in this service turns an error into a failed HTTP response:
//! directory errors degrade to an empty channel set, per-source feed errors
//! are logged and skipped, and total feed failure falls back to the
//! synthesized placeholder guide. The types here exist so those degrade
//! points log something precise.

use thiserror::Error;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// EPG source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Local file access errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channels file deserialization errors
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// EPG source specific errors
///
/// Each variant carries the source URL so a skipped source is attributable
/// in the logs.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network-level failures, including timeouts
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// Non-success HTTP status from the remote feed
    #[error("HTTP error: {status} - {url}")]
    Status { status: u16, url: String },

    /// Payload claimed to be gzip but could not be decompressed
    #[error("Decompression failed: {url} - {message}")]
    Decompress { url: String, message: String },
}
