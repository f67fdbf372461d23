use chrono::{Local, NaiveDate};

use super::domain::ApplicationRecord;
use super::evaluation::{Assessment, PolicyConfig, PolicyField, PolicyState, RuleEngine};

/// Caller-side editing state: the record being filled in, the admin policy buffer,
/// and the assessment shown for the current values.
///
/// Every mutation re-runs the engine explicitly; nothing recomputes behind the caller's back.
#[derive(Debug, Clone)]
pub struct ScreeningSession {
    record: ApplicationRecord,
    policy: PolicyState,
    today: NaiveDate,
    assessment: Assessment,
}

impl ScreeningSession {
    pub fn new(policy: PolicyConfig) -> Self {
        Self::starting_on(policy, Local::now().date_naive())
    }

    /// Session pinned to a fixed evaluation date.
    pub fn starting_on(policy: PolicyConfig, today: NaiveDate) -> Self {
        let record = ApplicationRecord::default();
        let assessment = RuleEngine::assess(&record, &policy, today);
        Self {
            record,
            policy: PolicyState::new(policy),
            today,
            assessment,
        }
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn policy(&self) -> &PolicyState {
        &self.policy
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn can_submit(&self) -> bool {
        self.assessment.can_submit
    }

    /// Whether the "High Risk" banner should be shown for the current values.
    pub fn high_risk(&self) -> bool {
        self.assessment.is_high_risk()
    }

    pub fn edit_record<F>(&mut self, edit: F) -> &Assessment
    where
        F: FnOnce(&mut ApplicationRecord),
    {
        edit(&mut self.record);
        self.refresh()
    }

    pub fn replace_record(&mut self, record: ApplicationRecord) -> &Assessment {
        self.record = record;
        self.refresh()
    }

    /// Draft edits do not change the assessment until committed.
    pub fn edit_policy(&mut self, field: PolicyField, raw: &str) {
        self.policy.edit(field, raw);
    }

    pub fn commit_policy(&mut self) -> &Assessment {
        self.policy.commit();
        self.refresh()
    }

    pub fn cancel_policy_edit(&mut self) {
        self.policy.cancel();
    }

    /// Start a fresh record after a successful submission.
    pub fn reset_record(&mut self) -> &Assessment {
        self.record = ApplicationRecord::default();
        self.refresh()
    }

    fn refresh(&mut self) -> &Assessment {
        self.assessment = RuleEngine::assess(&self.record, self.policy.committed(), self.today);
        &self.assessment
    }
}
