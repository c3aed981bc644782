//! Engine-boundary configuration and the two-layer override merge.

use serde::{Deserialize, Serialize};

/// Configuration passed to the compression engine for one invocation.
///
/// Field names on the wire match the engine boundary (`maxSizeMB`,
/// `maxWidthOrHeight`, `fileType`, `useWebWorker`). A resolved record always
/// has every field populated; partial configuration lives in
/// [`CompressionOverrides`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressionOptions {
    /// Maximum output size in megabytes
    #[serde(rename = "maxSizeMB")]
    pub max_size_mb: f64,
    /// Maximum output dimension (longest side) in pixels
    #[serde(rename = "maxWidthOrHeight")]
    pub max_width_or_height: u32,
    /// Output MIME type (e.g. `image/webp`)
    #[serde(rename = "fileType")]
    pub file_type: String,
    /// Whether the engine should offload work to a background worker
    #[serde(rename = "useWebWorker")]
    pub use_web_worker: bool,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_mb: 0.2,
            max_width_or_height: 1920,
            file_type: "image/jpeg".to_string(),
            use_web_worker: true,
        }
    }
}

/// Caller-supplied overrides for a session's base defaults.
///
/// Unset fields fall back to the base record during [`resolve`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompressionOverrides {
    #[serde(rename = "maxSizeMB", default, skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
    #[serde(rename = "maxWidthOrHeight", default, skip_serializing_if = "Option::is_none")]
    pub max_width_or_height: Option<u32>,
    #[serde(rename = "fileType", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(rename = "useWebWorker", default, skip_serializing_if = "Option::is_none")]
    pub use_web_worker: Option<bool>,
}

impl CompressionOverrides {
    /// Override only the output MIME type, the common per-session tweak.
    pub fn file_type(file_type: impl Into<String>) -> Self {
        Self {
            file_type: Some(file_type.into()),
            ..Self::default()
        }
    }
}

/// Merges a base record with caller-supplied overrides, field by field.
///
/// Override fields take precedence individually, never wholesale.
pub fn resolve(base: &CompressionOptions, overrides: &CompressionOverrides) -> CompressionOptions {
    CompressionOptions {
        max_size_mb: overrides.max_size_mb.unwrap_or(base.max_size_mb),
        max_width_or_height: overrides
            .max_width_or_height
            .unwrap_or(base.max_width_or_height),
        file_type: overrides
            .file_type
            .clone()
            .unwrap_or_else(|| base.file_type.clone()),
        use_web_worker: overrides.use_web_worker.unwrap_or(base.use_web_worker),
    }
}
