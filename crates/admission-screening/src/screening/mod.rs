//! Candidate admission screening: field rules, policy thresholds, risk tiers, and the
//! append-only audit ledger of accepted submissions.

pub mod domain;
pub mod evaluation;
pub mod ledger;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    parse_date, ApplicationRecord, Field, InterviewStatus, Qualification, ScoreMode,
};
pub use evaluation::{
    Assessment, EvaluationResult, PolicyConfig, PolicyField, PolicyState, RiskTier, RuleEngine,
};
pub use ledger::{AuditEntry, AuditLedger, LEDGER_KEY};
pub use repository::{FileLedgerStore, InMemoryLedgerStore, LedgerStore, PersistenceError};
pub use router::screening_router;
pub use service::{ScreeningService, SubmissionError};
pub use session::ScreeningSession;
