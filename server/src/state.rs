//! Application state management.

use didscope_batch::ReputationService;
use didscope_core::AppConfig;
use std::sync::Arc;

/// State shared by all HTTP handlers.
///
/// Everything inside is immutable after startup, so cloning per request is
/// just reference counting.
#[derive(Clone)]
pub struct AppState {
    /// Validation service over the configured provider chain
    pub service: ReputationService,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from configuration.
    ///
    /// # Errors
    /// Returns error if the provider chain cannot be built.
    pub fn new(config: AppConfig) -> didscope_batch::Result<Self> {
        let service = ReputationService::from_config(&config)?;
        Ok(Self::with_service(config, service))
    }

    /// Create state around an existing service.
    pub fn with_service(config: AppConfig, service: ReputationService) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Request body limit in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.config.server.max_body_bytes
    }
}
