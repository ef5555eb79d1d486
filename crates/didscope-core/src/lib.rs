//! DIDScope Core - Foundation crate for the DIDScope reputation service.
//!
//! This crate provides the canonical reputation record, error handling,
//! configuration management, and phone number helpers that all other
//! DIDScope crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration errors using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Canonical record and enums (`ReputationRecord`, `RiskLevel`, `Grade`)
//! - [`phone`] - Phone number formatting and detection
//!
//! # Example
//!
//! ```rust
//! use didscope_core::{AppConfig, DataSource, ReputationRecord};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.batching.max_batch_size, 100);
//!
//! let record = ReputationRecord::degraded("+15551234567", "Validation failed");
//! assert_eq!(record.source, DataSource::Unavailable);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod phone;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BatchingConfig, ProvidersConfig, ServerConfig};
pub use error::{ConfigError, ConfigResult};
pub use phone::{digits_only, format_phone_number, looks_like_phone_number};
pub use types::{
    AttestationLevel, BulkUploadResult, Cnam, DataSource, Grade, HealthFactors, HealthScore,
    Location, Reputation, ReputationRecord, RiskLevel, Timestamp,
};
