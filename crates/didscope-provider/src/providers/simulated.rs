//! Randomized stand-in used when no real provider answers.

use crate::error::{ProviderError, Result};
use crate::provider::{ProviderCapabilities, ReputationProvider};
use async_trait::async_trait;
use didscope_core::{
    AttestationLevel, Cnam, DataSource, Location, Reputation, ReputationRecord, RiskLevel,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const CARRIERS: [&str; 4] = ["AT&T", "Verizon", "T-Mobile", "Sprint"];
const LINE_TYPES: [&str; 3] = ["mobile", "landline", "voip"];
const ATTESTATIONS: [AttestationLevel; 4] = [
    AttestationLevel::A,
    AttestationLevel::B,
    AttestationLevel::C,
    AttestationLevel::Unknown,
];

/// Provider that fabricates plausible reputation data.
///
/// Records are always tagged `source: simulated` so they are never mistaken
/// for real lookups.
pub struct SimulatedProvider {
    rng: Option<Mutex<StdRng>>,
}

impl SimulatedProvider {
    /// Create a provider drawing from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: None }
    }

    /// Create a provider with a fixed seed, for reproducible output.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Build a simulated record from the given RNG.
    pub fn simulate_with<R: Rng + ?Sized>(phone_number: &str, rng: &mut R) -> ReputationRecord {
        // One draw decides both flags, so a scam is always also spam.
        let roll: f64 = rng.gen();
        let spam_likely = roll < 0.15;
        let scam_likely = roll < 0.05;

        let risk_roll: f64 = rng.gen();
        let risk_level = if risk_roll > 0.7 {
            RiskLevel::High
        } else if risk_roll > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let flagged_by_carriers = if spam_likely || scam_likely {
            CARRIERS
                .iter()
                .filter(|_| rng.gen_bool(0.3))
                .map(|c| (*c).to_string())
                .collect()
        } else {
            Vec::new()
        };

        let attestation = ATTESTATIONS.choose(rng).copied().unwrap_or_default();

        let mut record = ReputationRecord::new(phone_number, DataSource::Simulated);
        record.is_valid = true;
        record.carrier = CARRIERS.choose(rng).map(|c| (*c).to_string());
        record.line_type = LINE_TYPES.choose(rng).map(|l| (*l).to_string());
        record.location = Some(Location {
            city: Some("New York".to_string()),
            state: Some("NY".to_string()),
            country: Some("US".to_string()),
        });
        record.reputation = Reputation {
            spam_score: Some(risk_roll * 100.0),
            spam_likely,
            scam_likely,
            risk_level,
            flagged_by_carriers,
            attestation_level: Some(attestation),
        };
        record.cnam = Some(Cnam {
            registered: Some(rng.gen_bool(0.7)),
            display_name: rng.gen_bool(0.5).then(|| "Business Name".to_string()),
        });
        record.disconnected = Some(rng.gen_bool(0.02));
        record.reassigned = Some(rng.gen_bool(0.05));
        record
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReputationProvider for SimulatedProvider {
    async fn lookup(&self, phone_number: &str) -> Result<ReputationRecord> {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng
                    .lock()
                    .map_err(|_| ProviderError::Internal("simulation RNG poisoned".to_string()))?;
                Ok(Self::simulate_with(phone_number, &mut *rng))
            }
            None => Ok(Self::simulate_with(phone_number, &mut rand::thread_rng())),
        }
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            source: DataSource::Simulated,
            reputation_signals: true,
            carrier_lookup: true,
            location_lookup: true,
            simulated: true,
        }
    }

    fn provider_id(&self) -> &'static str {
        "simulated"
    }
}
