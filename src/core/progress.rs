use serde::{Deserialize, Serialize};

use crate::processing::BatchProgress;

/// Progress message type
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressPhase {
    Start,
    Progress,
    Complete,
}

/// Renderer-facing progress update for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// Progress phase (start, progress, complete)
    pub phase: ProgressPhase,
    /// Number of settled items, successes and failures alike
    pub settled_items: usize,
    /// Total number of items in the batch
    pub total_items: usize,
    /// Number of failed items so far
    pub failed_items: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// Optional additional metadata for the renderer
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl ProgressUpdate {
    /// The update published when a batch is accepted, before any item
    /// settles.
    pub fn start(total_items: usize) -> Self {
        Self {
            phase: ProgressPhase::Start,
            settled_items: 0,
            total_items,
            failed_items: 0,
            progress_percentage: 0,
            metadata: None,
        }
    }

    /// Converts a runner callback payload into a renderer update.
    pub fn from_batch(progress: &BatchProgress) -> Self {
        let progress_percentage = if progress.total_items > 0 {
            (progress.settled_items * 100) / progress.total_items
        } else {
            0
        };
        let phase = if progress.settled_items >= progress.total_items {
            ProgressPhase::Complete
        } else {
            ProgressPhase::Progress
        };

        Self {
            phase,
            settled_items: progress.settled_items,
            total_items: progress.total_items,
            failed_items: progress.failed_items,
            progress_percentage,
            metadata: None,
        }
    }
}
