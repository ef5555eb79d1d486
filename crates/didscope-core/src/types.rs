//! Shared types used across the DIDScope workspace.
//!
//! The canonical [`ReputationRecord`] is the only entity that flows between
//! subsystems: providers create it, the scorer enriches it once, and the
//! presentation layer renders or exports it. Field names serialize in
//! camelCase so the JSON shape matches what dashboard clients expect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall risk tier reported by a data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No meaningful risk signals
    Low,
    /// Some risk signals
    Medium,
    /// Strong risk signals
    High,
    /// The data source gave no risk assessment
    #[default]
    Unknown,
}

impl RiskLevel {
    /// Lowercase label used in exports and tables.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// STIR/SHAKEN signer attestation level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttestationLevel {
    /// Full attestation
    A,
    /// Partial attestation
    B,
    /// Gateway attestation
    C,
    /// No attestation information
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl AttestationLevel {
    /// Label used in exports and tables.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AttestationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade derived from the health score total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    A,
    /// 75 to 89
    B,
    /// 60 to 74
    C,
    /// 45 to 59
    D,
    /// Below 45
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Single-letter label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the data in a record came from.
///
/// Simulated records are always tagged so that grading, summaries and
/// exports can tell them apart from real provider data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// IPQualityScore phone reputation API
    Ipqs,
    /// NumVerify phone validation API
    NumVerify,
    /// Randomized synthetic data
    Simulated,
    /// No source produced data (degraded record)
    #[default]
    Unavailable,
}

impl DataSource {
    /// Lowercase label used in exports and tables.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipqs => "ipqs",
            Self::NumVerify => "numverify",
            Self::Simulated => "simulated",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic information for a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// City name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country name or code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Caller-name (CNAM) registration details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cnam {
    /// `None` means the source did not check registration
    #[serde(default)]
    pub registered: Option<bool>,
    /// Registered display name, or a note from the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Reputation signals for a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reputation {
    /// Upstream spam confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spam_score: Option<f64>,
    /// Number is likely used for spam
    #[serde(default)]
    pub spam_likely: bool,
    /// Number is likely used for scams (independent of `spam_likely`)
    #[serde(default)]
    pub scam_likely: bool,
    /// Risk tier
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Carriers that flagged the number; duplicates are kept
    #[serde(default)]
    pub flagged_by_carriers: Vec<String>,
    /// STIR/SHAKEN attestation; `None` is treated as unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation_level: Option<AttestationLevel>,
}

/// Per-factor breakdown of a health score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactors {
    /// Carrier quality, 0-25
    pub carrier_quality: u32,
    /// Attestation, 0-35
    pub attestation: u32,
    /// Spam risk (higher is cleaner), 0-40
    pub spam_risk: u32,
    /// Always zero; kept for output compatibility
    pub dial_activity: u32,
    /// Always zero; kept for output compatibility
    pub age: u32,
}

impl HealthFactors {
    /// Sum of all factor contributions.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.carrier_quality + self.attestation + self.spam_risk + self.dial_activity + self.age
    }
}

/// Composite health score attached to a record by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Total score, 0-100
    pub score: u32,
    /// Letter grade
    pub grade: Grade,
    /// Per-factor breakdown
    pub factors: HealthFactors,
    /// Ordered, de-duplicated recommendations
    pub recommendations: Vec<String>,
}

/// Canonical reputation record for one phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationRecord {
    /// Number as supplied by the caller
    pub phone_number: String,
    /// When the record was created
    #[serde(default)]
    pub timestamp: Timestamp,
    /// Whether the source considers the number live
    #[serde(default)]
    pub is_valid: bool,
    /// Carrier name, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Line type (mobile, landline, voip, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<String>,
    /// Location details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Reputation signals
    #[serde(default)]
    pub reputation: Reputation,
    /// CNAM details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnam: Option<Cnam>,
    /// Number has been disconnected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnected: Option<bool>,
    /// Number may have been reassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reassigned: Option<bool>,
    /// Data source tag
    #[serde(default)]
    pub source: DataSource,
    /// Derived score; absent until scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<HealthScore>,
    /// Non-empty when the record holds degraded data
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ReputationRecord {
    /// Create an empty record for a number, stamped now.
    #[must_use]
    pub fn new(phone_number: impl Into<String>, source: DataSource) -> Self {
        Self {
            phone_number: phone_number.into(),
            timestamp: Timestamp::now(),
            is_valid: false,
            carrier: None,
            line_type: None,
            location: None,
            reputation: Reputation::default(),
            cnam: None,
            disconnected: None,
            reassigned: None,
            source,
            health_score: None,
            errors: Vec::new(),
        }
    }

    /// Create the record used when a check could not produce data.
    ///
    /// The number is reported invalid with unknown risk and a single
    /// error entry, so callers can still render a row for it.
    #[must_use]
    pub fn degraded(phone_number: impl Into<String>, message: impl Into<String>) -> Self {
        let mut record = Self::new(phone_number, DataSource::Unavailable);
        record.errors.push(message.into());
        record
    }

    /// Whether the record carries degraded data.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether the record came from the simulated source.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.source == DataSource::Simulated
    }

    /// Attestation level with a missing value read as unknown.
    #[must_use]
    pub fn attestation(&self) -> AttestationLevel {
        self.reputation.attestation_level.unwrap_or_default()
    }
}

/// Outcome of a bulk check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadResult {
    /// Numbers submitted before truncation
    pub total_numbers: usize,
    /// Records produced
    pub processed: usize,
    /// Records carrying errors
    pub failed: usize,
    /// The records, in input order
    pub results: Vec<ReputationRecord>,
}

impl BulkUploadResult {
    /// Build a result from the submitted count and the produced records.
    #[must_use]
    pub fn new(total_numbers: usize, results: Vec<ReputationRecord>) -> Self {
        let failed = results.iter().filter(|r| r.is_degraded()).count();
        Self {
            total_numbers,
            processed: results.len(),
            failed,
            results,
        }
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
///
/// Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Format as an ISO-8601 string with millisecond precision and a `Z` suffix.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
