/*!
 * Error types for the srtdigest application.
 *
 * Parsing has exactly one fatal condition (no usable entries). Malformed
 * blocks are dropped by the parser and never show up here.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while obtaining or parsing subtitle content
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Input was read but not a single block parsed into an entry
    #[error("No parsable subtitle content found")]
    NoParsableContent,

    /// The subtitle file does not exist
    #[error("Subtitle file does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The subtitle file exists but could not be read as UTF-8 text
    #[error("Failed to read subtitle file {}: {source}", path.display())]
    Read {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file or output stream operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error while producing the JSON record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
