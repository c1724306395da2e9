//! Error types for the tools crate.

use mek_core::error::EngineError;
use thiserror::Error;

/// Errors raised while loading, checking or exporting unit files.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Failed to read or write a file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        /// Path being accessed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a RON document.
    #[error("Failed to parse RON file '{path}': {source}")]
    Ron {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to encode JSON.
    #[error("Failed to encode '{path}' as JSON: {source}")]
    Json {
        /// Path of the source document.
        path: String,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be turned into a unit record.
    #[error("'{path}' does not describe a unit: {errors:?}")]
    Unparseable {
        /// Path to the file.
        path: String,
        /// Parse errors reported by the engine.
        errors: Vec<String>,
    },

    /// Engine failure.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
