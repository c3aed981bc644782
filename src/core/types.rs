//! Core types for image payloads and renderer-facing metadata.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An image payload with its metadata.
///
/// The payload is opaque to the orchestration layer: it is produced by the
/// file picker (inputs) or the compression engine (outputs) and never
/// inspected or mutated here. Cloning is cheap since the payload is shared.
#[derive(Debug, Clone)]
pub struct ImageData {
    payload: Arc<[u8]>,
    mime_type: String,
    file_name: Option<String>,
}

impl ImageData {
    /// Creates an image from a raw payload and its MIME type.
    pub fn new(payload: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            payload: Arc::from(payload.into()),
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    /// Attaches the original file name, when the input boundary provides one.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// MIME type of the payload (e.g. `image/jpeg`).
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Original file name, if known.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Metadata view for the renderer.
    pub fn meta(&self) -> ImageMeta {
        ImageMeta {
            size: self.size(),
            mime_type: self.mime_type.clone(),
            file_name: self.file_name.clone(),
        }
    }
}

/// Serializable image metadata consumed by the renderer.
///
/// The renderer derives display strings (size in KB, type captions) from
/// these numbers; this crate never formats text for the interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    /// Payload size in bytes
    pub size: u64,
    /// MIME type of the payload
    pub mime_type: String,
    /// Original file name, if known
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Before/after statistics for one completed compression.
///
/// Derived on demand from an input/output pair; never stored in session
/// state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    /// Input payload size in bytes
    pub original_size: u64,
    /// Output payload size in bytes
    pub compressed_size: u64,
    /// Bytes saved (can be negative if the output grew)
    pub saved_bytes: i64,
    /// Savings as a percentage of the original size
    pub compression_ratio: f64,
}

impl CompressionReport {
    /// Builds a report from an input image and its compressed output.
    pub fn new(original: &ImageData, compressed: &ImageData) -> Self {
        let original_size = original.size();
        let compressed_size = compressed.size();
        let saved_bytes = original_size as i64 - compressed_size as i64;
        let compression_ratio = if original_size > 0 {
            (saved_bytes as f64 / original_size as f64) * 100.0
        } else {
            0.0
        };

        Self {
            original_size,
            compressed_size,
            saved_bytes,
            compression_ratio,
        }
    }
}
