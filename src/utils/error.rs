//! Error types for the compression orchestration layer.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use serde::Serialize;
use thiserror::Error;

/// Main error type for the orchestration layer.
///
/// All failures are converted to this type before being surfaced to the
/// caller or the renderer.
#[derive(Error, Debug, Serialize)]
pub enum CompressorError {
    /// Input or configuration validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),

    /// The compression engine rejected one image
    #[error("Engine error: {0}")]
    Engine(String),

    /// Orchestration-level failure outside any single item
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Convenience result type for orchestration operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

// Helper methods for error creation
impl CompressorError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn engine<T: Into<String>>(msg: T) -> Self {
        Self::Engine(msg.into())
    }

    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }
}

// The engine boundary reports opaque errors; keep the full cause chain in
// the message since the source error type is not serializable.
impl From<anyhow::Error> for CompressorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Engine(format!("{err:#}"))
    }
}
