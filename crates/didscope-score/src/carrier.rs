//! Carrier quality lookup.
//!
//! Matching is an unanchored, case-insensitive substring test walked in
//! table order; the first hit wins, not the longest. `bandwidth.com` can
//! therefore never match because `bandwidth` precedes it.

/// One row of the carrier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierTier {
    /// Lowercase needle matched against the carrier name
    pub needle: &'static str,
    /// Carrier quality score, 0-25
    pub score: u32,
}

/// Score used when no carrier is present or nothing matches.
pub const DEFAULT_CARRIER_SCORE: u32 = 12;

/// Known carriers in match order.
pub const CARRIER_TABLE: &[CarrierTier] = &[
    CarrierTier { needle: "verizon", score: 25 },
    CarrierTier { needle: "at&t", score: 25 },
    CarrierTier { needle: "att", score: 25 },
    CarrierTier { needle: "level 3", score: 22 },
    CarrierTier { needle: "centurylink", score: 22 },
    CarrierTier { needle: "inteliquent", score: 21 },
    CarrierTier { needle: "bandwidth", score: 19 },
    CarrierTier { needle: "bandwidth.com", score: 19 },
    CarrierTier { needle: "sinch", score: 17 },
    CarrierTier { needle: "peerless", score: 15 },
    CarrierTier { needle: "neutral tandem", score: 15 },
    CarrierTier { needle: "twilio", score: 10 },
    CarrierTier { needle: "voip.ms", score: 6 },
];

/// Find the first table row whose needle occurs in `carrier`.
#[must_use]
pub fn match_carrier(carrier: &str) -> Option<&'static CarrierTier> {
    let lowered = carrier.to_lowercase();
    CARRIER_TABLE.iter().find(|tier| lowered.contains(tier.needle))
}

/// Carrier quality score for an optional carrier name.
#[must_use]
pub fn carrier_quality(carrier: Option<&str>) -> u32 {
    carrier
        .and_then(match_carrier)
        .map_or(DEFAULT_CARRIER_SCORE, |tier| tier.score)
}
