mod policy;
mod risk;
mod rules;

pub use policy::{PolicyConfig, PolicyField, PolicyState};
pub use risk::RiskTier;

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationRecord, Field, InterviewStatus};

/// Stateless rule engine; the policy is supplied on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate against the local calendar date.
    pub fn evaluate(record: &ApplicationRecord, policy: &PolicyConfig) -> EvaluationResult {
        Self::evaluate_on(record, policy, Local::now().date_naive())
    }

    pub fn evaluate_on(
        record: &ApplicationRecord,
        policy: &PolicyConfig,
        today: NaiveDate,
    ) -> EvaluationResult {
        EvaluationResult {
            hard_errors: rules::hard_errors(record),
            exceptions: rules::policy_exceptions(record, policy, today),
        }
    }

    /// Evaluate once and derive the live risk preview and submission gate from that result.
    pub fn assess(
        record: &ApplicationRecord,
        policy: &PolicyConfig,
        today: NaiveDate,
    ) -> Assessment {
        let result = Self::evaluate_on(record, policy, today);
        let risk_tier = result.risk_tier(policy.high_risk_threshold);
        let can_submit = result.is_admissible() && required_fields_present(record);

        Assessment {
            result,
            risk_tier,
            can_submit,
        }
    }
}

fn required_fields_present(record: &ApplicationRecord) -> bool {
    [
        &record.full_name,
        &record.email,
        &record.phone,
        &record.aadhaar_number,
    ]
    .iter()
    .all(|value| !value.trim().is_empty())
        && record.qualification.is_some()
        && record.interview_status != Some(InterviewStatus::Rejected)
}

/// Field-keyed hard errors and policy exceptions for one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub hard_errors: BTreeMap<Field, String>,
    pub exceptions: BTreeMap<Field, String>,
}

impl EvaluationResult {
    pub fn is_admissible(&self) -> bool {
        self.hard_errors.is_empty()
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    pub fn risk_tier(&self, high_risk_threshold: usize) -> RiskTier {
        RiskTier::from_exception_count(self.exception_count(), high_risk_threshold)
    }

    pub fn hard_error(&self, field: Field) -> Option<&str> {
        self.hard_errors.get(&field).map(String::as_str)
    }

    pub fn exception(&self, field: Field) -> Option<&str> {
        self.exceptions.get(&field).map(String::as_str)
    }
}

/// Everything a caller shows after an edit: field messages, risk preview, submit gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub risk_tier: RiskTier,
    pub can_submit: bool,
}

impl Assessment {
    pub fn is_high_risk(&self) -> bool {
        self.risk_tier == RiskTier::High
    }
}
