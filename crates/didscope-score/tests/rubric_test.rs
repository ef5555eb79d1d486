use didscope_core::{AttestationLevel, DataSource, Grade, ReputationRecord, RiskLevel};
use didscope_score::{calculate, grade_for, messages, score_record};
use std::collections::HashSet;

/// Build every combination of the boolean and enum inputs the rubric reads.
fn input_grid() -> Vec<ReputationRecord> {
    let carriers = [None, Some("Verizon"), Some("Twilio"), Some("Unknown Co")];
    let attestations = [
        None,
        Some(AttestationLevel::A),
        Some(AttestationLevel::B),
        Some(AttestationLevel::C),
        Some(AttestationLevel::Unknown),
    ];
    let risks = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Unknown,
    ];
    let flags = [None, Some(true), Some(false)];

    let mut records = Vec::new();
    for carrier in carriers {
        for attestation in attestations {
            for risk in risks {
                for spam in [false, true] {
                    for disconnected in flags {
                        for reassigned in flags {
                            let mut record =
                                ReputationRecord::new("+15551234567", DataSource::Simulated);
                            record.carrier = carrier.map(str::to_string);
                            record.reputation.attestation_level = attestation;
                            record.reputation.risk_level = risk;
                            record.reputation.spam_likely = spam;
                            record.disconnected = disconnected;
                            record.reassigned = reassigned;
                            records.push(record);
                        }
                    }
                }
            }
        }
    }
    records
}

#[test]
fn recommendations_never_contain_duplicates() {
    for record in input_grid() {
        let health = calculate(&record);
        let unique: HashSet<&String> = health.recommendations.iter().collect();
        assert_eq!(unique.len(), health.recommendations.len(), "{record:?}");
    }
}

#[test]
fn disconnected_numbers_always_lead_with_removal() {
    for record in input_grid()
        .into_iter()
        .filter(|r| r.disconnected == Some(true))
    {
        let health = calculate(&record);
        assert_eq!(health.factors.spam_risk, 0);
        assert_eq!(health.recommendations[0], messages::DISCONNECTED);
    }
}

#[test]
fn grade_is_a_step_function_of_total() {
    for record in input_grid() {
        let health = calculate(&record);
        assert_eq!(health.grade, grade_for(health.score));
        assert!(health.score <= 100);
    }
}

#[test]
fn grade_bands_match_thresholds() {
    let expectations = [
        (90, Grade::A),
        (75, Grade::B),
        (60, Grade::C),
        (45, Grade::D),
        (44, Grade::F),
        (89, Grade::B),
    ];
    for (score, grade) in expectations {
        assert_eq!(grade_for(score), grade, "score {score}");
    }
}

#[test]
fn scored_json_keeps_the_dashboard_shape() {
    let payload = serde_json::json!({
        "phoneNumber": "+15551234567",
        "timestamp": "2026-02-17T12:00:00Z",
        "isValid": true,
        "carrier": "VERIZON",
        "reputation": {
            "spamLikely": false,
            "scamLikely": false,
            "riskLevel": "low",
            "flaggedByCarriers": [],
            "attestationLevel": "A"
        },
        "source": "ipqs"
    });
    let record: ReputationRecord = serde_json::from_value(payload).expect("parse record");

    let scored = serde_json::to_value(score_record(&record)).expect("serialize record");
    let health = &scored["healthScore"];
    assert_eq!(health["score"], 100);
    assert_eq!(health["grade"], "A");
    assert_eq!(health["factors"]["carrierQuality"], 25);
    assert_eq!(health["factors"]["attestation"], 35);
    assert_eq!(health["factors"]["spamRisk"], 40);
    assert_eq!(health["factors"]["dialActivity"], 0);
    assert_eq!(health["factors"]["age"], 0);
    assert_eq!(health["recommendations"][0], messages::EXCELLENT);
}
