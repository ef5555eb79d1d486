//! Weighted-factor health scorer.

use crate::carrier::carrier_quality;
use didscope_core::{
    AttestationLevel, Grade, HealthFactors, HealthScore, ReputationRecord, RiskLevel,
};

/// Maximum spam-risk factor; deductions start here.
const SPAM_RISK_MAX: u32 = 40;
const SPAM_LIKELY_PENALTY: u32 = 15;
const SCAM_LIKELY_PENALTY: u32 = 15;
const FLAGGED_CARRIER_PENALTY: u32 = 5;
const HIGH_RISK_PENALTY: u32 = 10;
const MEDIUM_RISK_PENALTY: u32 = 5;
/// Upper bound of the penalty derived from an upstream spam score.
const SPAM_SCORE_PENALTY_MAX: u32 = 20;
const REASSIGNED_PENALTY: u32 = 10;

/// Attestation below this triggers the attestation recommendation.
const ATTESTATION_ADVICE_BELOW: u32 = 21;
/// Spam risk below this triggers the spam recommendation.
const SPAM_ADVICE_BELOW: u32 = 27;

/// Recommendation texts.
pub mod messages {
    /// Attestation is below B level.
    pub const REQUEST_ATTESTATION: &str = "Request A-level attestation from your provider";
    /// Spam factor is low.
    pub const SPAM_INDICATORS: &str = "Number has spam indicators - consider replacement";
    /// Grade A.
    pub const EXCELLENT: &str = "Excellent health - maintain current practices";
    /// Grade D.
    pub const POOR: &str = "Poor health - needs urgent attention";
    /// Grade F.
    pub const CRITICAL: &str = "CRITICAL: Consider immediate replacement";
    /// Number was reassigned.
    pub const REASSIGNED: &str = "Number may be reassigned - verify ownership";
    /// Number was disconnected.
    pub const DISCONNECTED: &str = "NUMBER DISCONNECTED - Remove immediately";
}

/// Score a record, returning a copy with `health_score` attached.
///
/// Any score already present on the input is recomputed and replaced.
#[must_use]
pub fn score_record(record: &ReputationRecord) -> ReputationRecord {
    let mut scored = record.clone();
    scored.health_score = Some(calculate(record));
    scored
}

/// Compute the health score for a record.
#[must_use]
pub fn calculate(record: &ReputationRecord) -> HealthScore {
    let mut factors = HealthFactors {
        carrier_quality: carrier_quality(record.carrier.as_deref()),
        attestation: attestation_score(record.attestation()),
        spam_risk: spam_risk_score(record),
        dial_activity: 0,
        age: 0,
    };

    let mut recommendations: Vec<&'static str> = Vec::new();
    if factors.attestation < ATTESTATION_ADVICE_BELOW {
        recommendations.push(messages::REQUEST_ATTESTATION);
    }
    if factors.spam_risk < SPAM_ADVICE_BELOW {
        recommendations.push(messages::SPAM_INDICATORS);
    }

    // Total and grade are fixed before the terminal overrides below.
    let score = factors.total();
    let grade = grade_for(score);

    match grade {
        Grade::A => recommendations.insert(0, messages::EXCELLENT),
        Grade::D => recommendations.insert(0, messages::POOR),
        Grade::F => recommendations.insert(0, messages::CRITICAL),
        Grade::B | Grade::C => {}
    }

    if record.reassigned == Some(true) {
        factors.spam_risk = factors.spam_risk.saturating_sub(REASSIGNED_PENALTY);
        recommendations.insert(0, messages::REASSIGNED);
    }
    // Applied last so the removal message always leads the list.
    if record.disconnected == Some(true) {
        factors.spam_risk = 0;
        recommendations.insert(0, messages::DISCONNECTED);
    }

    HealthScore {
        score,
        grade,
        factors,
        recommendations: dedup_preserving_order(recommendations),
    }
}

/// Map a total score to its letter grade.
#[must_use]
pub fn grade_for(score: u32) -> Grade {
    match score {
        90.. => Grade::A,
        75..=89 => Grade::B,
        60..=74 => Grade::C,
        45..=59 => Grade::D,
        _ => Grade::F,
    }
}

fn attestation_score(level: AttestationLevel) -> u32 {
    match level {
        AttestationLevel::A => 35,
        AttestationLevel::B => 21,
        AttestationLevel::C => 7,
        AttestationLevel::Unknown => 0,
    }
}

fn spam_risk_score(record: &ReputationRecord) -> u32 {
    let reputation = &record.reputation;
    let mut penalty: u32 = 0;

    if reputation.spam_likely {
        penalty += SPAM_LIKELY_PENALTY;
    }
    if reputation.scam_likely {
        penalty += SCAM_LIKELY_PENALTY;
    }

    let flagged = u32::try_from(reputation.flagged_by_carriers.len()).unwrap_or(u32::MAX);
    penalty = penalty.saturating_add(flagged.saturating_mul(FLAGGED_CARRIER_PENALTY));

    penalty += match reputation.risk_level {
        RiskLevel::High => HIGH_RISK_PENALTY,
        RiskLevel::Medium => MEDIUM_RISK_PENALTY,
        RiskLevel::Low | RiskLevel::Unknown => 0,
    };

    if let Some(spam_score) = reputation.spam_score {
        penalty = penalty.saturating_add(spam_score_penalty(spam_score));
    }

    SPAM_RISK_MAX.saturating_sub(penalty)
}

/// Linear penalty for an upstream 0-100 spam score, floored, 0-20.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn spam_score_penalty(spam_score: f64) -> u32 {
    if !spam_score.is_finite() {
        return 0;
    }
    let clamped = spam_score.clamp(0.0, 100.0);
    (clamped / 100.0 * f64::from(SPAM_SCORE_PENALTY_MAX)).floor() as u32
}

fn dedup_preserving_order(items: Vec<&'static str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use didscope_core::DataSource;

    fn clean_record(carrier: &str, attestation: AttestationLevel) -> ReputationRecord {
        let mut record = ReputationRecord::new("+15551234567", DataSource::Ipqs);
        record.is_valid = true;
        record.carrier = Some(carrier.to_string());
        record.reputation.attestation_level = Some(attestation);
        record.reputation.risk_level = RiskLevel::Low;
        record
    }

    #[test]
    fn test_perfect_record_scores_100() {
        let health = calculate(&clean_record("AT&T Mobility", AttestationLevel::A));
        assert_eq!(health.factors.carrier_quality, 25);
        assert_eq!(health.factors.attestation, 35);
        assert_eq!(health.factors.spam_risk, 40);
        assert_eq!(health.score, 100);
        assert_eq!(health.grade, Grade::A);
        assert_eq!(health.recommendations, vec![messages::EXCELLENT.to_string()]);
    }

    #[test]
    fn test_mixed_signal_scenario() {
        let mut record = ReputationRecord::new("+15551234567", DataSource::Simulated);
        record.carrier = Some("Unknown Co".to_string());
        record.reputation.attestation_level = Some(AttestationLevel::Unknown);
        record.reputation.spam_likely = true;
        record.reputation.flagged_by_carriers = vec!["Verizon".to_string()];
        record.reputation.risk_level = RiskLevel::Medium;

        let health = calculate(&record);
        assert_eq!(health.factors.attestation, 0);
        assert_eq!(health.factors.carrier_quality, 12);
        assert_eq!(health.factors.spam_risk, 15);
        assert_eq!(health.score, 27);
        assert_eq!(health.grade, Grade::F);
        assert_eq!(
            health.recommendations,
            vec![
                messages::CRITICAL.to_string(),
                messages::REQUEST_ATTESTATION.to_string(),
                messages::SPAM_INDICATORS.to_string(),
            ]
        );
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade_for(100), Grade::A);
        assert_eq!(grade_for(90), Grade::A);
        assert_eq!(grade_for(89), Grade::B);
        assert_eq!(grade_for(75), Grade::B);
        assert_eq!(grade_for(74), Grade::C);
        assert_eq!(grade_for(60), Grade::C);
        assert_eq!(grade_for(59), Grade::D);
        assert_eq!(grade_for(45), Grade::D);
        assert_eq!(grade_for(44), Grade::F);
        assert_eq!(grade_for(0), Grade::F);
    }

    #[test]
    fn test_attestation_levels() {
        assert_eq!(attestation_score(AttestationLevel::A), 35);
        assert_eq!(attestation_score(AttestationLevel::B), 21);
        assert_eq!(attestation_score(AttestationLevel::C), 7);
        assert_eq!(attestation_score(AttestationLevel::Unknown), 0);

        let mut record = clean_record("Verizon", AttestationLevel::B);
        record.reputation.attestation_level = None;
        assert_eq!(calculate(&record).factors.attestation, 0);
    }

    #[test]
    fn test_b_attestation_gets_no_attestation_advice() {
        let health = calculate(&clean_record("Verizon", AttestationLevel::B));
        assert!(!health
            .recommendations
            .contains(&messages::REQUEST_ATTESTATION.to_string()));
        let health = calculate(&clean_record("Verizon", AttestationLevel::C));
        assert!(health
            .recommendations
            .contains(&messages::REQUEST_ATTESTATION.to_string()));
    }

    #[test]
    fn test_spam_risk_floors_at_zero() {
        let mut record = clean_record("Verizon", AttestationLevel::A);
        record.reputation.spam_likely = true;
        record.reputation.scam_likely = true;
        record.reputation.risk_level = RiskLevel::High;
        record.reputation.flagged_by_carriers = vec!["AT&T".to_string(); 4];
        record.reputation.spam_score = Some(100.0);

        let health = calculate(&record);
        assert_eq!(health.factors.spam_risk, 0);
        // Other factors are unaffected by the spam floor
        assert_eq!(health.factors.carrier_quality, 25);
        assert_eq!(health.factors.attestation, 35);
    }

    #[test]
    fn test_spam_score_penalty_floors() {
        assert_eq!(spam_score_penalty(0.0), 0);
        assert_eq!(spam_score_penalty(4.99), 0);
        assert_eq!(spam_score_penalty(5.0), 1);
        assert_eq!(spam_score_penalty(49.9), 9);
        assert_eq!(spam_score_penalty(100.0), 20);
        assert_eq!(spam_score_penalty(250.0), 20);
        assert_eq!(spam_score_penalty(-10.0), 0);
        assert_eq!(spam_score_penalty(f64::NAN), 0);
    }

    #[test]
    fn test_duplicate_flagging_carriers_each_count() {
        let mut record = clean_record("Verizon", AttestationLevel::A);
        record.reputation.flagged_by_carriers = vec!["Verizon".to_string(), "Verizon".to_string()];
        assert_eq!(calculate(&record).factors.spam_risk, 30);
    }

    #[test]
    fn test_disconnected_zeroes_spam_and_leads_recommendations() {
        let mut record = clean_record("Verizon", AttestationLevel::A);
        record.disconnected = Some(true);
        record.reassigned = Some(true);

        let health = calculate(&record);
        assert_eq!(health.factors.spam_risk, 0);
        assert_eq!(health.recommendations[0], messages::DISCONNECTED);
        assert_eq!(health.recommendations[1], messages::REASSIGNED);
        // Total was fixed before the override
        assert_eq!(health.score, 100);
    }

    #[test]
    fn test_reassigned_penalty_floors_at_zero() {
        let mut record = clean_record("Verizon", AttestationLevel::A);
        record.reassigned = Some(true);
        assert_eq!(calculate(&record).factors.spam_risk, 30);

        record.reputation.spam_likely = true;
        record.reputation.scam_likely = true;
        record.reputation.risk_level = RiskLevel::Medium;
        // 40 - 15 - 15 - 5 = 5, minus 10 floors at 0
        let health = calculate(&record);
        assert_eq!(health.factors.spam_risk, 0);
        assert_eq!(health.recommendations[0], messages::REASSIGNED);
    }

    #[test]
    fn test_inert_factors_stay_zero() {
        let health = calculate(&clean_record("Twilio", AttestationLevel::C));
        assert_eq!(health.factors.dial_activity, 0);
        assert_eq!(health.factors.age, 0);
        assert_eq!(health.score, health.factors.total());
    }

    #[test]
    fn test_poor_grade_message() {
        // 12 + 21 + (40 - 15) = 58 -> D
        let mut record = clean_record("Unknown Co", AttestationLevel::B);
        record.reputation.spam_likely = true;
        let health = calculate(&record);
        assert_eq!(health.score, 58);
        assert_eq!(health.grade, Grade::D);
        assert_eq!(health.recommendations[0], messages::POOR);
    }

    #[test]
    fn test_score_record_leaves_input_untouched() {
        let mut record = clean_record("Verizon", AttestationLevel::A);
        record.reputation.flagged_by_carriers = vec!["Sprint".to_string()];
        let before = record.clone();

        let scored = score_record(&record);
        assert_eq!(record, before);
        assert!(record.health_score.is_none());
        assert_eq!(scored.reputation, before.reputation);
        assert!(scored.health_score.is_some());
    }

    #[test]
    fn test_rescoring_replaces_existing_score() {
        let record = clean_record("Verizon", AttestationLevel::A);
        let mut scored = score_record(&record);
        scored.reputation.spam_likely = true;

        let rescored = score_record(&scored);
        let health = rescored.health_score.expect("score attached");
        assert_eq!(health.factors.spam_risk, 25);
        assert_eq!(health.score, 85);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut record = clean_record("Sinch", AttestationLevel::B);
        record.reputation.spam_score = Some(63.2);
        assert_eq!(calculate(&record), calculate(&record));
    }
}
