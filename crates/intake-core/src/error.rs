//! Error types for Intake Core.

use thiserror::Error;

/// Core error type for intake operations.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// A tool call is missing required arguments.
    #[error("Missing required fields for tool '{tool}': {}", fields.join(", "))]
    MissingRequiredFields {
        /// Tool being invoked.
        tool: String,
        /// Names of the missing arguments, in schema order.
        fields: Vec<String>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration or arguments were not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Sanitizer error passthrough.
    #[error("Sanitizer error: {0}")]
    Sanitize(#[from] intake_sanitize::SanitizeError),
}
