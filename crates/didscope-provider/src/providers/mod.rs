//! Reputation provider implementations.

pub mod common;
pub mod ipqs;
pub mod numverify;
pub mod simulated;

pub use ipqs::IpqsProvider;
pub use numverify::NumVerifyProvider;
pub use simulated::SimulatedProvider;
