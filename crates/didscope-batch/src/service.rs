//! Validation service tying the provider chain to the scorer.

use crate::error::{BatchError, Result};
use crate::orchestrator::{run_windows, BatchPlan};
use didscope_core::{AppConfig, ReputationRecord};
use didscope_provider::ProviderChain;
use didscope_score::score_record;
use std::sync::Arc;

/// Checks phone numbers one at a time or in windowed batches.
#[derive(Clone)]
pub struct ReputationService {
    chain: Arc<ProviderChain>,
    route_plan: BatchPlan,
}

impl ReputationService {
    /// Create a service over a provider chain.
    #[must_use]
    pub fn new(chain: Arc<ProviderChain>, route_plan: BatchPlan) -> Self {
        Self { chain, route_plan }
    }

    /// Build the provider chain and route plan from configuration.
    ///
    /// # Errors
    /// Returns error if a provider cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let chain = ProviderChain::from_config(&config.providers)?;
        Ok(Self::new(
            Arc::new(chain),
            BatchPlan::route(&config.batching),
        ))
    }

    /// Plan used by [`Self::check_bulk`].
    #[must_use]
    pub fn route_plan(&self) -> &BatchPlan {
        &self.route_plan
    }

    /// Provider chain backing this service.
    #[must_use]
    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Look up and score a single number.
    pub async fn check(&self, phone_number: &str) -> ReputationRecord {
        let record = self.chain.normalize(phone_number).await;
        let scored = score_record(&record);
        tracing::debug!(
            phone = %phone_number,
            source = %scored.source,
            score = scored.health_score.as_ref().map(|h| h.score),
            "number checked"
        );
        scored
    }

    /// Run [`Self::check`] in its own task.
    ///
    /// A panic while checking is reported as an error instead of unwinding
    /// into the caller.
    pub async fn check_isolated(&self, phone_number: String) -> Result<ReputationRecord> {
        let service = self.clone();
        let task_phone = phone_number.clone();
        tokio::spawn(async move { service.check(&task_phone).await })
            .await
            .map_err(|e| {
                if e.is_panic() {
                    BatchError::TaskPanicked {
                        phone_number,
                        message: panic_message(e.into_panic()),
                    }
                } else {
                    BatchError::TaskCancelled { phone_number }
                }
            })
    }

    /// Check many numbers with the route plan.
    pub async fn check_bulk(&self, phone_numbers: Vec<String>) -> Vec<ReputationRecord> {
        self.check_bulk_with(phone_numbers, &self.route_plan).await
    }

    /// Submit numbers to [`Self::check_bulk`] in sequential chunks.
    ///
    /// This is how interactive clients drive bulk checks: no overall cap,
    /// and `on_chunk(done, total)` is called after each chunk settles.
    pub async fn check_in_chunks(
        &self,
        phone_numbers: Vec<String>,
        chunk_size: usize,
        mut on_chunk: impl FnMut(usize, usize),
    ) -> Vec<ReputationRecord> {
        let total = phone_numbers.len();
        let mut results = Vec::with_capacity(total);
        for chunk in phone_numbers.chunks(chunk_size.max(1)) {
            results.extend(self.check_bulk(chunk.to_vec()).await);
            on_chunk(results.len(), total);
        }
        results
    }

    /// Check many numbers with an explicit plan.
    pub async fn check_bulk_with(
        &self,
        phone_numbers: Vec<String>,
        plan: &BatchPlan,
    ) -> Vec<ReputationRecord> {
        tracing::info!(
            count = phone_numbers.len(),
            window_size = plan.window_size,
            "starting bulk check"
        );
        run_windows(phone_numbers, plan, |phone_number| {
            self.check_isolated(phone_number)
        })
        .await
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
