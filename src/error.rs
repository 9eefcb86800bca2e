//! Error types for the extractor.
//!
//! A single `ExtractError` covers configuration, input and I/O failures.
//! Structural oddities in the documents themselves (no headings found,
//! orphaned level-2 headings) are deliberately *not* errors: they are
//! handled by silent degradation or placeholder synthesis in the parsers.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Requested document key is absent from the job configuration.
    #[error("Configuration has no document named '{0}'")]
    MissingDocument(String),

    /// Requested step section is absent for a document.
    #[error("Missing configuration for document '{document}': section \"{step}\" with its input/output paths is required")]
    MissingStep { document: String, step: String },

    /// Input block carries neither `lines` nor `content`.
    #[error("Malformed input block {path}: expected a \"lines\" array or a \"content\" string")]
    MalformedBlock { path: PathBuf },

    /// Caller-supplied heading pattern failed to compile.
    #[error("Invalid heading pattern override '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
