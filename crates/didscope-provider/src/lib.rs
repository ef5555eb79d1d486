//! DIDScope Provider - phone reputation lookups behind one trait.
//!
//! Each upstream source is an adapter implementing [`ReputationProvider`]
//! that maps its own payload into the canonical [`ReputationRecord`]. A
//! [`ProviderChain`] asks adapters in order and never lets an upstream error
//! escape: the first success wins, otherwise a simulated or degraded record
//! comes back.
//!
//! # Example
//!
//! ```rust
//! use didscope_provider::{ProviderChain, SimulatedProvider};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let mut chain = ProviderChain::new();
//! chain.set_fallback(Arc::new(SimulatedProvider::seeded(1)));
//!
//! let record = chain.normalize("+15551234567").await;
//! assert!(record.is_simulated());
//! # }
//! ```
//!
//! [`ReputationRecord`]: didscope_core::ReputationRecord

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod chain;
pub mod error;
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use chain::{ProviderChain, NO_PROVIDER_MESSAGE};
pub use error::{ProviderError, Result};
pub use provider::{ProviderCapabilities, ReputationProvider};
pub use providers::{IpqsProvider, NumVerifyProvider, SimulatedProvider};
