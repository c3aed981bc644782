// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod coordinator;

// Public exports for external consumers
pub use crate::core::{
    CompressionOptions, CompressionOverrides, CompressionReport, CompressionSession, ImageData,
    ImageMeta, ProgressPhase, ProgressUpdate, SessionSnapshot, resolve,
};
pub use crate::coordinator::Coordinator;
pub use crate::processing::{BatchProgress, BatchRunner, CompressionEngine};
pub use crate::utils::{CompressorError, CompressorResult};
