//! Core types and session state management.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`ImageData`]: An opaque image payload with metadata
//! - [`CompressionOptions`]: Engine-boundary configuration
//! - [`CompressionSession`]: A configured compression context and its state
//! - [`ProgressUpdate`]: Renderer-facing progress messages

mod options;
mod progress;
mod session;
mod types;

pub use options::{CompressionOptions, CompressionOverrides, resolve};
pub use progress::{ProgressPhase, ProgressUpdate};
pub use session::{CompressionSession, SessionSnapshot};
pub use types::{CompressionReport, ImageData, ImageMeta};
