//! Application-level wiring between the input collaborators and the
//! compression sessions.
//!
//! The coordinator owns two independent sessions, one tuned for single
//! uploads (`image/webp`) and one for batch uploads (`image/jpeg`). It
//! forwards raw inputs from the file picker and the drop zone into the
//! correct session, echoes those inputs for "before" previews, and
//! republishes session state and batch progress for the renderer. It has no
//! compression logic of its own.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::core::{
    CompressionOverrides, CompressionReport, CompressionSession, ImageData, ProgressUpdate,
    SessionSnapshot,
};
use crate::processing::CompressionEngine;
use crate::utils::CompressorResult;

type ProgressSlot = Arc<std::sync::Mutex<Option<ProgressUpdate>>>;

pub struct Coordinator {
    single_session: CompressionSession,
    batch_session: CompressionSession,
    current_input: Mutex<Option<ImageData>>,
    current_inputs: Mutex<Vec<ImageData>>,
    batch_progress: ProgressSlot,
}

impl Coordinator {
    /// Wires both sessions to the given engine.
    pub fn new(engine: Arc<dyn CompressionEngine>) -> CompressorResult<Self> {
        let single_session = CompressionSession::new(
            Arc::clone(&engine),
            CompressionOverrides::file_type("image/webp"),
        )?;

        let batch_progress: ProgressSlot = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&batch_progress);
        let batch_session =
            CompressionSession::new(engine, CompressionOverrides::file_type("image/jpeg"))?
                .with_progress_observer(move |progress| {
                    let update = ProgressUpdate::from_batch(&progress);
                    *sink.lock().unwrap_or_else(|e| e.into_inner()) = Some(update);
                });

        Ok(Self {
            single_session,
            batch_session,
            current_input: Mutex::new(None),
            current_inputs: Mutex::new(Vec::new()),
            batch_progress,
        })
    }

    /// Handles a single-file selection from the file picker.
    ///
    /// Stores the raw file as the current input image and forwards it to the
    /// single-upload session.
    pub async fn upload_image(&self, file: ImageData) -> Option<ImageData> {
        debug!(
            "Single upload received: {} bytes ({})",
            file.size(),
            file.mime_type()
        );
        *self.current_input.lock().await = Some(file.clone());
        self.single_session.compress_one(file).await
    }

    /// Handles a multi-file drop from the drop zone.
    ///
    /// Stores the raw files as the current input images and forwards them to
    /// the batch-upload session; returns the successes in input order.
    pub async fn upload_images(&self, files: Vec<ImageData>) -> Vec<ImageData> {
        debug!("Batch upload received: {} files", files.len());
        *self.current_inputs.lock().await = files.clone();
        *self
            .batch_progress
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(ProgressUpdate::start(files.len()));
        self.batch_session.compress_many(files).await
    }

    /// Raw file behind the current single "before" preview.
    pub async fn current_input(&self) -> Option<ImageData> {
        self.current_input.lock().await.clone()
    }

    /// Raw files behind the current batch "before" previews.
    pub async fn current_inputs(&self) -> Vec<ImageData> {
        self.current_inputs.lock().await.clone()
    }

    /// State of the single-upload session.
    pub async fn single_state(&self) -> SessionSnapshot {
        self.single_session.snapshot().await
    }

    /// State of the batch-upload session.
    pub async fn batch_state(&self) -> SessionSnapshot {
        self.batch_session.snapshot().await
    }

    /// Latest batch progress message, if a batch has been submitted.
    pub fn latest_batch_progress(&self) -> Option<ProgressUpdate> {
        self.batch_progress
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Before/after statistics for the single slot, once both sides exist.
    pub async fn single_report(&self) -> Option<CompressionReport> {
        let input = self.current_input.lock().await.clone()?;
        let output = self.single_session.snapshot().await.single_result?;
        Some(CompressionReport::new(&input, &output))
    }
}
