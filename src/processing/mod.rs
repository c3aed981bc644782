mod batch;
mod engine;

pub use batch::{BatchProgress, BatchRunner};
pub use engine::CompressionEngine;
