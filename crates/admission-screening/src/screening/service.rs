use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use super::domain::{ApplicationRecord, Field};
use super::evaluation::{Assessment, PolicyConfig, PolicyField, PolicyState, RuleEngine};
use super::ledger::{AuditEntry, AuditLedger};
use super::repository::{LedgerStore, PersistenceError};

/// Service composing the rule engine, admin policy state, and the audit ledger.
pub struct ScreeningService<S> {
    store: Arc<S>,
    policy: Mutex<PolicyState>,
    ledger: Mutex<AuditLedger>,
}

impl<S> ScreeningService<S>
where
    S: LedgerStore + 'static,
{
    /// Load the ledger, failing if the stored data is malformed.
    pub fn open(store: Arc<S>, policy: PolicyConfig) -> Result<Self, PersistenceError> {
        let ledger = AuditLedger::load(&*store)?;
        info!(entries = ledger.len(), "audit ledger loaded");
        Ok(Self::with_ledger(store, policy, ledger))
    }

    /// Load the ledger, starting empty if the stored data cannot be read.
    pub fn hydrate(store: Arc<S>, policy: PolicyConfig) -> Self {
        let ledger = match AuditLedger::load(&*store) {
            Ok(ledger) => {
                info!(entries = ledger.len(), "audit ledger loaded");
                ledger
            }
            Err(error) => {
                warn!(%error, "audit ledger unreadable, starting with an empty ledger");
                AuditLedger::new()
            }
        };
        Self::with_ledger(store, policy, ledger)
    }

    fn with_ledger(store: Arc<S>, policy: PolicyConfig, ledger: AuditLedger) -> Self {
        Self {
            store,
            policy: Mutex::new(PolicyState::new(policy)),
            ledger: Mutex::new(ledger),
        }
    }

    pub fn assess(&self, record: &ApplicationRecord) -> Assessment {
        self.assess_on(record, Local::now().date_naive())
    }

    pub fn assess_on(&self, record: &ApplicationRecord, today: NaiveDate) -> Assessment {
        let policy = self.policy();
        RuleEngine::assess(record, &policy, today)
    }

    /// Accept a submission and persist the ledger, or report why it was refused.
    pub fn submit(&self, record: &ApplicationRecord) -> Result<AuditEntry, SubmissionError> {
        self.submit_on(record, Local::now().date_naive())
    }

    pub fn submit_on(
        &self,
        record: &ApplicationRecord,
        today: NaiveDate,
    ) -> Result<AuditEntry, SubmissionError> {
        let assessment = self.assess_on(record, today);
        if !assessment.can_submit {
            debug!(
                hard_errors = assessment.result.hard_errors.len(),
                "submission blocked"
            );
            return Err(SubmissionError::Blocked {
                hard_errors: assessment.result.hard_errors,
            });
        }

        let entry = AuditEntry::new(
            record,
            assessment.result.exception_count(),
            assessment.risk_tier,
        );

        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let updated = ledger.append(entry.clone());
        updated.save(&*self.store)?;
        *ledger = updated;

        info!(
            entry_id = %entry.id,
            risk = %entry.risk_level,
            exceptions = entry.exception_count,
            "submission recorded"
        );
        Ok(entry)
    }

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.ledger
            .lock()
            .expect("ledger mutex poisoned")
            .entries()
            .to_vec()
    }

    /// Clear every audit entry. Callers gate this behind an explicit confirmation.
    pub fn clear_audit_log(&self) -> Result<(), PersistenceError> {
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let cleared = ledger.clear();
        cleared.save(&*self.store)?;
        let removed = ledger.len();
        *ledger = cleared;
        info!(removed, "audit ledger cleared");
        Ok(())
    }

    /// Committed policy used for evaluation.
    pub fn policy(&self) -> PolicyConfig {
        self.policy
            .lock()
            .expect("policy mutex poisoned")
            .committed()
            .clone()
    }

    pub fn policy_state(&self) -> PolicyState {
        self.policy.lock().expect("policy mutex poisoned").clone()
    }

    pub fn edit_policy(&self, edits: &BTreeMap<PolicyField, String>) -> PolicyConfig {
        let mut state = self.policy.lock().expect("policy mutex poisoned");
        for (field, raw) in edits {
            state.edit(*field, raw);
        }
        state.draft().clone()
    }

    pub fn commit_policy(&self) -> PolicyConfig {
        let mut state = self.policy.lock().expect("policy mutex poisoned");
        let committed = state.commit().clone();
        info!(?committed, "screening policy committed");
        committed
    }

    pub fn cancel_policy_edit(&self) -> PolicyConfig {
        let mut state = self.policy.lock().expect("policy mutex poisoned");
        state.cancel();
        state.draft().clone()
    }
}

/// Error raised when a submission cannot be recorded.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission blocked by {} hard error(s)", .hard_errors.len())]
    Blocked { hard_errors: BTreeMap<Field, String> },
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
