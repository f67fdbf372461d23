use std::fmt;

use serde::{Deserialize, Serialize};

/// Admin-tunable thresholds governing the soft screening rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    pub min_age: u32,
    pub max_future_grad_years: u32,
    pub min_percentage: f64,
    #[serde(rename = "minCGPA")]
    pub min_cgpa: f64,
    pub min_screening_score: f64,
    pub high_risk_threshold: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_future_grad_years: 1,
            min_percentage: 60.0,
            min_cgpa: 6.0,
            min_screening_score: 50.0,
            high_risk_threshold: 2,
        }
    }
}

impl PolicyConfig {
    /// Overwrite one threshold from admin text input. Text that does not parse counts as zero.
    pub fn set_from_text(&mut self, field: PolicyField, raw: &str) {
        let raw = raw.trim();
        match field {
            PolicyField::MinAge => self.min_age = lenient_whole(raw) as u32,
            PolicyField::MaxFutureGradYears => {
                self.max_future_grad_years = lenient_whole(raw) as u32
            }
            PolicyField::MinPercentage => self.min_percentage = lenient_decimal(raw),
            PolicyField::MinCgpa => self.min_cgpa = lenient_decimal(raw),
            PolicyField::MinScreeningScore => self.min_screening_score = lenient_decimal(raw),
            PolicyField::HighRiskThreshold => {
                self.high_risk_threshold = lenient_whole(raw) as usize
            }
        }
    }
}

/// Whole-number thresholds keep the integer part of any numeric text; negatives floor at zero.
fn lenient_whole(raw: &str) -> f64 {
    lenient_decimal(raw).trunc().max(0.0)
}

fn lenient_decimal(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Threshold names accepted at the policy edit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyField {
    #[serde(rename = "minAge")]
    MinAge,
    #[serde(rename = "maxFutureGradYears")]
    MaxFutureGradYears,
    #[serde(rename = "minPercentage")]
    MinPercentage,
    #[serde(rename = "minCGPA")]
    MinCgpa,
    #[serde(rename = "minScreeningScore")]
    MinScreeningScore,
    #[serde(rename = "highRiskThreshold")]
    HighRiskThreshold,
}

impl PolicyField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinAge => "minAge",
            Self::MaxFutureGradYears => "maxFutureGradYears",
            Self::MinPercentage => "minPercentage",
            Self::MinCgpa => "minCGPA",
            Self::MinScreeningScore => "minScreeningScore",
            Self::HighRiskThreshold => "highRiskThreshold",
        }
    }
}

impl fmt::Display for PolicyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Committed policy plus the pending edit buffer an admin works on.
///
/// Evaluation only ever reads `committed`; the draft becomes live on [`PolicyState::commit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyState {
    committed: PolicyConfig,
    draft: PolicyConfig,
}

impl PolicyState {
    pub fn new(committed: PolicyConfig) -> Self {
        Self {
            draft: committed.clone(),
            committed,
        }
    }

    pub fn committed(&self) -> &PolicyConfig {
        &self.committed
    }

    pub fn draft(&self) -> &PolicyConfig {
        &self.draft
    }

    pub fn edit(&mut self, field: PolicyField, raw: &str) {
        self.draft.set_from_text(field, raw);
    }

    pub fn has_pending_changes(&self) -> bool {
        self.draft != self.committed
    }

    pub fn commit(&mut self) -> &PolicyConfig {
        self.committed = self.draft.clone();
        &self.committed
    }

    pub fn cancel(&mut self) {
        self.draft = self.committed.clone();
    }
}

impl Default for PolicyState {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
