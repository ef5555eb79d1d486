//! DIDScope Score - health scoring for reputation records.
//!
//! The scorer is a pure function from a [`ReputationRecord`] to a
//! [`HealthScore`]: no I/O, no randomness, identical input gives identical
//! output. It borrows the record immutably and returns a new record with the
//! score attached, so callers never observe changes to their own copy.
//!
//! # Rubric
//!
//! | Factor | Max | Source |
//! |---|---|---|
//! | Carrier quality | 25 | ordered substring table, see [`carrier`] |
//! | Attestation | 35 | STIR/SHAKEN level |
//! | Spam risk | 40 | deductions, floored at 0 |
//! | Dial activity | 0 | inert |
//! | Age | 0 | inert |
//!
//! # Example
//!
//! ```rust
//! use didscope_core::{AttestationLevel, DataSource, Grade, ReputationRecord};
//!
//! let mut record = ReputationRecord::new("+15551234567", DataSource::Ipqs);
//! record.carrier = Some("Verizon Wireless".to_string());
//! record.reputation.attestation_level = Some(AttestationLevel::A);
//!
//! let scored = didscope_score::score_record(&record);
//! let health = scored.health_score.expect("score attached");
//! assert_eq!(health.score, 100);
//! assert_eq!(health.grade, Grade::A);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod carrier;
pub mod scorer;

pub use carrier::{carrier_quality, CarrierTier, CARRIER_TABLE, DEFAULT_CARRIER_SCORE};
pub use scorer::{calculate, grade_for, score_record, messages};
