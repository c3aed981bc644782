//! Compression sessions: one configuration and its derived state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::options::{CompressionOptions, CompressionOverrides, resolve};
use crate::core::types::ImageData;
use crate::processing::{BatchProgress, BatchRunner, CompressionEngine};
use crate::utils::{CompressorError, CompressorResult, validate_options};

/// Mutable state owned by one session.
///
/// Busy flags are in-flight counters so overlapping calls keep the flag
/// raised until the last of them resolves. `last_resolved_seq` tags
/// `single_result` with the call sequence number of the resolution that
/// produced it: a late resolution of an older call never overwrites a newer
/// one.
#[derive(Debug, Default)]
struct SessionState {
    single_result: Option<ImageData>,
    batch_results: Vec<ImageData>,
    single_in_flight: usize,
    batch_in_flight: usize,
    last_resolved_seq: u64,
}

/// Cloned view of a session's state for the renderer.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Most recently resolved single compression output, if any
    pub single_result: Option<ImageData>,
    /// Successful outputs of the most recent batch call, in input order
    pub batch_results: Vec<ImageData>,
    /// Whether a single compression call is in flight
    pub is_busy_single: bool,
    /// Whether a batch call has not yet fully resolved
    pub is_busy_batch: bool,
}

/// A configured, stateful compression context bound to one use-case.
///
/// The session resolves its effective options once at construction: the
/// engine-boundary defaults merged with the caller's overrides, field by
/// field. Both operations drive the external [`CompressionEngine`] and
/// record their outcomes in the session's own state; nothing else mutates
/// it.
pub struct CompressionSession {
    engine: Arc<dyn CompressionEngine>,
    options: CompressionOptions,
    runner: BatchRunner,
    state: Mutex<SessionState>,
    call_seq: AtomicU64,
}

impl CompressionSession {
    /// Creates a session from an engine handle and per-session overrides.
    ///
    /// Fails if the resolved options are invalid (zero bounds or an
    /// unrecognized output MIME type).
    pub fn new(
        engine: Arc<dyn CompressionEngine>,
        overrides: CompressionOverrides,
    ) -> CompressorResult<Self> {
        let options = resolve(&CompressionOptions::default(), &overrides);
        validate_options(&options)?;
        debug!("Creating compression session targeting {}", options.file_type);

        Ok(Self {
            engine,
            options,
            runner: BatchRunner::new(),
            state: Mutex::new(SessionState::default()),
            call_seq: AtomicU64::new(0),
        })
    }

    /// Installs a batch progress observer, replacing the default silent
    /// runner.
    pub fn with_progress_observer(
        mut self,
        callback: impl Fn(BatchProgress) + Send + Sync + 'static,
    ) -> Self {
        self.runner = BatchRunner::with_progress(callback);
        self
    }

    /// Effective options every engine invocation of this session uses.
    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }

    /// Compresses one image.
    ///
    /// Returns the compressed image, or `None` if the engine rejected it. A
    /// failed call leaves the previous result untouched; the busy flag
    /// clears on both paths. Concurrent calls race, and the last one to
    /// resolve wins the stored result.
    pub async fn compress_one(&self, input: ImageData) -> Option<ImageData> {
        match self.compress_single(&input).await {
            Ok(output) => {
                debug!(
                    "Compressed image: {} -> {} bytes ({})",
                    input.size(),
                    output.size(),
                    output.mime_type()
                );
                Some(output)
            }
            Err(e) => {
                warn!("Image compression failed: {}", e);
                None
            }
        }
    }

    /// Compresses many images concurrently.
    ///
    /// Delegates each item to the single-compression operation, waits for
    /// all of them to settle, stores the successes in input order, and
    /// returns them. Failed items are excluded without aborting their
    /// siblings; an empty input resolves to an empty result.
    pub async fn compress_many(&self, inputs: Vec<ImageData>) -> Vec<ImageData> {
        let total = inputs.len();
        debug!("Received batch of {} images", total);

        {
            let mut state = self.state.lock().await;
            state.batch_in_flight += 1;
        }

        let successes = self
            .runner
            .run(inputs, |input| async move {
                self.compress_single(&input).await
            })
            .await;

        let mut state = self.state.lock().await;
        state.batch_in_flight -= 1;
        state.batch_results = successes.clone();

        if successes.len() < total {
            warn!(
                "Batch compression kept {}/{} images",
                successes.len(),
                total
            );
        }

        successes
    }

    /// Current state for the renderer.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            single_result: state.single_result.clone(),
            batch_results: state.batch_results.clone(),
            is_busy_single: state.single_in_flight > 0,
            is_busy_batch: state.batch_in_flight > 0,
        }
    }

    /// One engine invocation with busy tracking and result recording.
    async fn compress_single(&self, input: &ImageData) -> CompressorResult<ImageData> {
        if input.is_empty() {
            return Err(CompressorError::validation("Empty image payload"));
        }

        let seq = self.call_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().await;
            state.single_in_flight += 1;
        }

        let outcome = self
            .engine
            .compress(input, &self.options)
            .await
            .map_err(CompressorError::from);

        let mut state = self.state.lock().await;
        state.single_in_flight -= 1;

        let output = outcome?;
        if seq > state.last_resolved_seq {
            state.last_resolved_seq = seq;
            state.single_result = Some(output.clone());
        } else {
            debug!("Discarding stale resolution of call {}", seq);
        }
        Ok(output)
    }
}
