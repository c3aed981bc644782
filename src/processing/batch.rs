//! Concurrent batch execution with order-preserving aggregation.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future;
use tracing::{debug, info, warn};

/// Represents the progress of a batch run, handed to the progress callback
/// after each item settles.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub total_items: usize,
    pub settled_items: usize,
    pub failed_items: usize,
}

type ProgressCallback = Box<dyn Fn(BatchProgress) + Send + Sync>;

/// Runs a per-item asynchronous operation over every element of an ordered
/// input sequence, concurrently, and keeps only the successful outputs.
///
/// The result order is a function of input order alone: items are aggregated
/// by iterating the settled outcomes in input order, never in completion
/// order. A failing item is logged and excluded; it never aborts its
/// siblings, and the run itself always resolves (an all-failed batch
/// resolves to an empty result).
pub struct BatchRunner {
    progress: Option<ProgressCallback>,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Creates a runner that reports per-item settlement.
    ///
    /// The callback fires in completion order with monotonically increasing
    /// `settled_items`.
    pub fn with_progress(callback: impl Fn(BatchProgress) + Send + Sync + 'static) -> Self {
        Self {
            progress: Some(Box::new(callback)),
        }
    }

    /// Launches `op` for every input without waiting on earlier items, waits
    /// for all of them to settle, and returns the successes in input order.
    pub async fn run<T, U, E, F, Fut>(&self, inputs: Vec<T>, op: F) -> Vec<U>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<U, E>>,
        E: Display,
    {
        let total = inputs.len();
        debug!("Running batch of {} items", total);

        let settled = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let observer = self.progress.as_deref();

        let outcomes = future::join_all(inputs.into_iter().map(|input| {
            let item = op(input);
            let settled = &settled;
            let failed = &failed;
            async move {
                let outcome = item.await;
                if outcome.is_err() {
                    failed.fetch_add(1, Ordering::SeqCst);
                }
                let progress = BatchProgress {
                    total_items: total,
                    settled_items: settled.fetch_add(1, Ordering::SeqCst) + 1,
                    failed_items: failed.load(Ordering::SeqCst),
                };
                if let Some(callback) = observer {
                    callback(progress);
                }
                outcome
            }
        }))
        .await;

        // Aggregate in input order; completion timing must not leak into the
        // result sequence.
        let mut successes = Vec::with_capacity(total);
        let mut failures = 0usize;
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(output) => successes.push(output),
                Err(e) => {
                    failures += 1;
                    debug!("Batch item {}/{} excluded from results: {}", index + 1, total, e);
                }
            }
        }

        if failures > 0 {
            warn!(
                "Batch completed with {} failed items out of {}",
                failures, total
            );
        } else {
            info!("Batch completed successfully: {} items processed", total);
        }

        successes
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn preserves_input_order_regardless_of_completion_order() {
        let runner = BatchRunner::new();
        // First item finishes last; the result must still lead with it.
        let results = runner
            .run(vec![(0u64, 50u64), (1, 10), (2, 1)], |(id, delay_ms)| async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok::<_, String>(id)
            })
            .await;

        assert_eq!(results, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn excludes_failures_without_aborting_siblings() {
        let runner = BatchRunner::new();
        let results = runner
            .run(vec![1u32, 2, 3], |n| async move {
                if n == 2 {
                    Err("unsupported".to_string())
                } else {
                    Ok(n * 10)
                }
            })
            .await;

        assert_eq!(results, vec![10, 30]);
    }

    #[tokio::test]
    async fn all_failed_still_resolves_empty() {
        let runner = BatchRunner::new();
        let results = runner
            .run(vec![1u32, 2], |_| async { Err::<u32, _>("broken") })
            .await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let runner = BatchRunner::new();
        let results = runner
            .run(Vec::<u32>::new(), |n| async move { Ok::<_, String>(n) })
            .await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn progress_fires_once_per_settled_item() {
        let seen: Arc<Mutex<Vec<BatchProgress>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let runner = BatchRunner::with_progress(move |progress| {
            sink.lock().unwrap().push(progress);
        });

        let results = runner
            .run(vec![1u32, 2, 3], |n| async move {
                if n == 3 {
                    Err("bad".to_string())
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(results, vec![1, 2]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        let settled: Vec<usize> = seen.iter().map(|p| p.settled_items).collect();
        assert_eq!(settled, vec![1, 2, 3]);
        assert!(seen.iter().all(|p| p.total_items == 3));
        assert_eq!(seen.last().unwrap().failed_items, 1);
    }
}
