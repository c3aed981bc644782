//! Shared test fixtures: scripted compression engines and tracing setup.

use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use image_compressor::{CompressionEngine, CompressionOptions, ImageData};

static INIT: Once = Once::new();

/// Installs the tracing subscriber once per test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .compact()
            .try_init();
    });
}

pub fn image(name: &str, size: usize, mime: &str) -> ImageData {
    ImageData::new(vec![0u8; size], mime).with_file_name(name)
}

fn compress_payload(image: &ImageData, options: &CompressionOptions) -> ImageData {
    let compressed_len = (image.payload().len() / 2).max(1);
    let mut output = ImageData::new(vec![1u8; compressed_len], options.file_type.clone());
    if let Some(name) = image.file_name() {
        output = output.with_file_name(name);
    }
    output
}

/// Engine that halves every payload and records each invocation's options.
pub struct RecordingEngine {
    pub calls: Mutex<Vec<(Option<String>, CompressionOptions)>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_options(&self) -> Vec<CompressionOptions> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, options)| options.clone())
            .collect()
    }
}

#[async_trait]
impl CompressionEngine for RecordingEngine {
    async fn compress(
        &self,
        image: &ImageData,
        options: &CompressionOptions,
    ) -> anyhow::Result<ImageData> {
        self.calls
            .lock()
            .unwrap()
            .push((image.file_name().map(String::from), options.clone()));
        Ok(compress_payload(image, options))
    }
}

/// Engine with per-file-name delays, for exercising completion-order races.
pub struct DelayedEngine {
    delays: HashMap<String, u64>,
}

impl DelayedEngine {
    pub fn new(delays: &[(&str, u64)]) -> Self {
        Self {
            delays: delays
                .iter()
                .map(|(name, ms)| (name.to_string(), *ms))
                .collect(),
        }
    }
}

#[async_trait]
impl CompressionEngine for DelayedEngine {
    async fn compress(
        &self,
        image: &ImageData,
        options: &CompressionOptions,
    ) -> anyhow::Result<ImageData> {
        let delay = image
            .file_name()
            .and_then(|name| self.delays.get(name))
            .copied()
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(compress_payload(image, options))
    }
}

/// Engine that rejects images whose file name starts with `fail`.
pub struct FailingEngine;

#[async_trait]
impl CompressionEngine for FailingEngine {
    async fn compress(
        &self,
        image: &ImageData,
        options: &CompressionOptions,
    ) -> anyhow::Result<ImageData> {
        if image.file_name().is_some_and(|name| name.starts_with("fail")) {
            anyhow::bail!("unsupported format: {}", image.mime_type());
        }
        Ok(compress_payload(image, options))
    }
}

/// Engine that blocks until the test releases a permit, so busy flags can be
/// observed mid-flight. Optionally fails after release to exercise the
/// failure path with the same timing control.
pub struct GatedEngine {
    pub gate: Semaphore,
    fail_on_release: bool,
}

impl GatedEngine {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            fail_on_release: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            gate: Semaphore::new(0),
            fail_on_release: true,
        }
    }
}

#[async_trait]
impl CompressionEngine for GatedEngine {
    async fn compress(
        &self,
        image: &ImageData,
        options: &CompressionOptions,
    ) -> anyhow::Result<ImageData> {
        let permit = self.gate.acquire().await?;
        permit.forget();
        if self.fail_on_release {
            anyhow::bail!("engine out of memory");
        }
        Ok(compress_payload(image, options))
    }
}
