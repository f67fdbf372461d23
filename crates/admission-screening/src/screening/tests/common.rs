use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::screening::domain::{ApplicationRecord, InterviewStatus, Qualification, ScoreMode};
use crate::screening::evaluation::PolicyConfig;
use crate::screening::repository::{InMemoryLedgerStore, LedgerStore, PersistenceError};
use crate::screening::{screening_router, ScreeningService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

pub(super) fn policy() -> PolicyConfig {
    PolicyConfig {
        min_age: 18,
        max_future_grad_years: 1,
        min_percentage: 60.0,
        min_cgpa: 6.0,
        min_screening_score: 50.0,
        high_risk_threshold: 2,
    }
}

/// A record with no hard errors and no policy exceptions as of [`today`].
pub(super) fn valid_record() -> ApplicationRecord {
    ApplicationRecord {
        full_name: "Asha Verma".to_string(),
        email: "asha.verma@example.com".to_string(),
        phone: "9876543210".to_string(),
        dob: NaiveDate::from_ymd_opt(2001, 4, 12),
        qualification: Some(Qualification::BTech),
        graduation_year: Some(2025),
        score: Some(78.5),
        score_mode: ScoreMode::Percentage,
        screening_score: Some(72.0),
        interview_status: Some(InterviewStatus::Cleared),
        aadhaar_number: "123456789012".to_string(),
        offer_letter_sent: false,
    }
}

/// Valid record tripping the dob, score and screening exceptions.
pub(super) fn high_risk_record() -> ApplicationRecord {
    ApplicationRecord {
        dob: NaiveDate::from_ymd_opt(2009, 1, 1),
        score: Some(41.0),
        screening_score: Some(12.5),
        ..valid_record()
    }
}

pub(super) fn build_service() -> (
    ScreeningService<InMemoryLedgerStore>,
    Arc<InMemoryLedgerStore>,
) {
    let store = Arc::new(InMemoryLedgerStore::default());
    let service = ScreeningService::hydrate(store.clone(), policy());
    (service, store)
}

pub(super) fn router_with_service(service: ScreeningService<InMemoryLedgerStore>) -> axum::Router {
    screening_router(Arc::new(service))
}

/// Store that reads fine but refuses every write.
pub(super) struct ReadOnlyStore;

impl LedgerStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
