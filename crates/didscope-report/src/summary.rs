//! Aggregate view of a batch of checked records.

use didscope_core::{Grade, ReputationRecord, RiskLevel};
use serde::{Deserialize, Serialize};

/// Count of records per health grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    /// Grade A
    #[serde(rename = "A")]
    pub a: usize,
    /// Grade B
    #[serde(rename = "B")]
    pub b: usize,
    /// Grade C
    #[serde(rename = "C")]
    pub c: usize,
    /// Grade D
    #[serde(rename = "D")]
    pub d: usize,
    /// Grade F
    #[serde(rename = "F")]
    pub f: usize,
}

impl GradeCounts {
    fn bump(&mut self, grade: Grade) {
        match grade {
            Grade::A => self.a += 1,
            Grade::B => self.b += 1,
            Grade::C => self.c += 1,
            Grade::D => self.d += 1,
            Grade::F => self.f += 1,
        }
    }

    /// Count for one grade.
    #[must_use]
    pub fn get(&self, grade: Grade) -> usize {
        match grade {
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
            Grade::F => self.f,
        }
    }
}

/// Summary of a bulk check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    /// Records summarized
    pub total: usize,
    /// Records without errors
    pub processed: usize,
    /// Records carrying errors
    pub failed: usize,
    /// Scored records per grade
    pub grades: GradeCounts,
    /// Mean health score over scored records
    pub average_score: Option<f64>,
    /// Records with high risk level
    pub high_risk: usize,
    /// Records marked spam or scam
    pub flagged: usize,
    /// Records from the simulated source
    pub simulated: usize,
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Completed normally
    Success,
    /// Worth a look
    Warning,
    /// Needs action
    Error,
}

/// Message shown to the user after a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl BulkSummary {
    /// Summarize a set of records.
    #[must_use]
    pub fn from_records(records: &[ReputationRecord]) -> Self {
        let mut grades = GradeCounts::default();
        let mut score_sum = 0u64;
        let mut scored = 0usize;

        for health in records.iter().filter_map(|r| r.health_score.as_ref()) {
            grades.bump(health.grade);
            score_sum += u64::from(health.score);
            scored += 1;
        }

        let failed = records.iter().filter(|r| r.is_degraded()).count();

        #[allow(clippy::cast_precision_loss)]
        let average_score = (scored > 0).then(|| score_sum as f64 / scored as f64);

        Self {
            total: records.len(),
            processed: records.len() - failed,
            failed,
            grades,
            average_score,
            high_risk: records
                .iter()
                .filter(|r| r.reputation.risk_level == RiskLevel::High)
                .count(),
            flagged: records
                .iter()
                .filter(|r| r.reputation.spam_likely || r.reputation.scam_likely)
                .count(),
            simulated: records.iter().filter(|r| r.is_simulated()).count(),
        }
    }

    /// Messages to show after a bulk check.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices = vec![Notice::new(
            NoticeLevel::Success,
            format!("Successfully checked {} numbers", self.total),
        )];

        if self.high_risk > 0 {
            notices.push(Notice::new(
                NoticeLevel::Error,
                format!("Found {} high-risk numbers!", self.high_risk),
            ));
        }
        if self.failed > 0 {
            notices.push(Notice::new(
                NoticeLevel::Warning,
                format!("{} numbers could not be validated", self.failed),
            ));
        }
        if self.simulated > 0 {
            notices.push(Notice::new(
                NoticeLevel::Warning,
                format!(
                    "{} results are simulated and do not reflect real lookups",
                    self.simulated
                ),
            ));
        }

        notices
    }
}

/// Message to show after checking a single number.
#[must_use]
pub fn single_notice(record: &ReputationRecord) -> Notice {
    if record.reputation.risk_level == RiskLevel::High {
        Notice::new(NoticeLevel::Error, "High risk number detected!")
    } else if record.reputation.spam_likely || record.reputation.scam_likely {
        Notice::new(NoticeLevel::Warning, "This number has been flagged")
    } else {
        Notice::new(NoticeLevel::Success, "Number checked successfully")
    }
}
