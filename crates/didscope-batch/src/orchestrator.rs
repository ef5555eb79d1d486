//! Windowed batch execution.
//!
//! Numbers are checked in fixed windows: every number in a window runs
//! concurrently, the next window starts once all of them settle, and a
//! fixed pause separates windows to stay under upstream rate limits.

use crate::error::Result;
use didscope_core::{BatchingConfig, ReputationRecord};
use futures::future::join_all;
use std::future::Future;
use std::time::Duration;

/// Error recorded on a record whose check failed inside a batch.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// How a batch is cut into windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Numbers checked concurrently per window
    pub window_size: usize,
    /// Numbers beyond this count are dropped
    pub max_items: usize,
    /// Pause between windows
    pub window_delay: Duration,
}

impl BatchPlan {
    /// Create a plan.
    #[must_use]
    pub fn new(window_size: usize, max_items: usize, window_delay: Duration) -> Self {
        Self {
            window_size,
            max_items,
            window_delay,
        }
    }

    /// Plan used by the HTTP bulk route.
    #[must_use]
    pub fn route(config: &BatchingConfig) -> Self {
        Self::new(
            config.route_window_size,
            config.max_batch_size,
            config.window_delay(),
        )
    }

    /// Set the pause between windows.
    #[must_use]
    pub fn with_window_delay(mut self, delay: Duration) -> Self {
        self.window_delay = delay;
        self
    }

    /// Number of windows needed for `len` input numbers.
    #[must_use]
    pub fn window_count(&self, len: usize) -> usize {
        len.min(self.max_items).div_ceil(self.effective_window())
    }

    fn effective_window(&self) -> usize {
        self.window_size.max(1)
    }
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self::route(&BatchingConfig::default())
    }
}

/// Check numbers window by window and return one record per number kept.
///
/// Output order matches input order. A check that errors becomes a degraded
/// record and does not affect the rest of the batch.
pub async fn run_windows<F, Fut>(
    items: Vec<String>,
    plan: &BatchPlan,
    check: F,
) -> Vec<ReputationRecord>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<ReputationRecord>>,
{
    let mut items = items;
    if items.len() > plan.max_items {
        tracing::info!(
            received = items.len(),
            max = plan.max_items,
            "truncating batch"
        );
        items.truncate(plan.max_items);
    }

    let total_windows = plan.window_count(items.len());
    let mut results = Vec::with_capacity(items.len());

    for (index, window) in items.chunks(plan.effective_window()).enumerate() {
        if index > 0 && !plan.window_delay.is_zero() {
            tokio::time::sleep(plan.window_delay).await;
        }

        tracing::debug!(
            window = index + 1,
            total_windows,
            size = window.len(),
            "checking window"
        );

        let outcomes = join_all(window.iter().cloned().map(&check)).await;

        for (phone_number, outcome) in window.iter().zip(outcomes) {
            match outcome {
                Ok(record) => results.push(record),
                Err(e) => {
                    tracing::warn!(phone = %phone_number, error = %e, "check failed in batch");
                    results.push(ReputationRecord::degraded(
                        phone_number.as_str(),
                        VALIDATION_FAILED,
                    ));
                }
            }
        }
    }

    results
}
