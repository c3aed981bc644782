//! The compression engine boundary.
//!
//! The engine re-encodes pixels; this crate only invokes it, configures it,
//! and interprets its outcome. Implementations may be CPU-bound and run on a
//! worker thread or separate process, which is opaque here: every call is a
//! plain await point for the orchestration layer.

use async_trait::async_trait;

use crate::core::{CompressionOptions, ImageData};

/// One compression operation: `compress(image, options) -> compressed image`.
///
/// Errors are opaque to the orchestration layer and are stringified into
/// [`CompressorError::Engine`](crate::utils::CompressorError) at the session
/// boundary.
#[async_trait]
pub trait CompressionEngine: Send + Sync {
    /// Compresses one image toward the configured size, dimension, and
    /// encoding targets.
    async fn compress(
        &self,
        image: &ImageData,
        options: &CompressionOptions,
    ) -> anyhow::Result<ImageData>;
}
