//! DIDScope Batch - windowed reputation checks.
//!
//! This crate turns the provider chain and the health scorer into a
//! validation service. Single checks normalize and score one number. Bulk
//! checks cut the input into fixed windows, run each window concurrently,
//! and pause between windows.
//!
//! # Features
//!
//! - Input capped at the configured batch size, extra numbers dropped
//! - Output order always matches input order
//! - A failing or panicking check becomes a degraded record, never a failed batch
//!
//! # Example
//!
//! ```rust,ignore
//! use didscope_batch::ReputationService;
//! use didscope_core::AppConfig;
//!
//! let service = ReputationService::from_config(&AppConfig::default())?;
//! let records = service
//!     .check_bulk(vec!["+15551234567".to_string(), "+15557654321".to_string()])
//!     .await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;
pub mod service;

// Re-export commonly used types
pub use error::{BatchError, Result};
pub use orchestrator::{run_windows, BatchPlan, VALIDATION_FAILED};
pub use service::ReputationService;
