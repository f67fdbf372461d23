use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::ApplicationRecord;
use super::evaluation::PolicyField;
use super::repository::LedgerStore;
use super::service::{ScreeningService, SubmissionError};

/// Router builder exposing evaluation, submission, audit, and policy endpoints.
pub fn screening_router<S>(service: Arc<ScreeningService<S>>) -> Router
where
    S: LedgerStore + 'static,
{
    Router::new()
        .route("/api/v1/screening/evaluate", post(evaluate_handler::<S>))
        .route("/api/v1/screening/submissions", post(submit_handler::<S>))
        .route(
            "/api/v1/screening/audit",
            get(audit_handler::<S>).delete(clear_audit_handler::<S>),
        )
        .route("/api/v1/screening/policy", get(policy_handler::<S>))
        .route(
            "/api/v1/screening/policy/draft",
            patch(edit_policy_handler::<S>),
        )
        .route(
            "/api/v1/screening/policy/commit",
            post(commit_policy_handler::<S>),
        )
        .route(
            "/api/v1/screening/policy/cancel",
            post(cancel_policy_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    axum::Json(record): axum::Json<ApplicationRecord>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let assessment = service.assess(&record);
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    axum::Json(record): axum::Json<ApplicationRecord>,
) -> Response
where
    S: LedgerStore + 'static,
{
    match service.submit(&record) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(SubmissionError::Blocked { hard_errors }) => {
            let payload = json!({
                "error": "submission blocked",
                "hardErrors": hard_errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn audit_handler<S>(State(service): State<Arc<ScreeningService<S>>>) -> Response
where
    S: LedgerStore + 'static,
{
    (StatusCode::OK, axum::Json(service.audit_log())).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClearAuditParams {
    #[serde(default)]
    confirm: bool,
}

pub(crate) async fn clear_audit_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    Query(params): Query<ClearAuditParams>,
) -> Response
where
    S: LedgerStore + 'static,
{
    if !params.confirm {
        let payload = json!({
            "error": "clearing the audit log requires confirm=true",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    match service.clear_audit_log() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler<S>(State(service): State<Arc<ScreeningService<S>>>) -> Response
where
    S: LedgerStore + 'static,
{
    (StatusCode::OK, axum::Json(service.policy_state())).into_response()
}

pub(crate) async fn edit_policy_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    axum::Json(edits): axum::Json<BTreeMap<PolicyField, Value>>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let edits: BTreeMap<PolicyField, String> = edits
        .into_iter()
        .map(|(field, value)| (field, policy_text(value)))
        .collect();
    let draft = service.edit_policy(&edits);
    (StatusCode::OK, axum::Json(draft)).into_response()
}

/// Admin inputs may arrive as JSON numbers or text; anything else reads as blank.
fn policy_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

pub(crate) async fn commit_policy_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
    body: Bytes,
) -> Response
where
    S: LedgerStore + 'static,
{
    let record = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match serde_json::from_slice::<ApplicationRecord>(&body) {
            Ok(record) => Some(record),
            Err(error) => {
                let payload = json!({
                    "error": format!("invalid record: {error}"),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        }
    };

    let policy = service.commit_policy();
    let assessment = record.map(|record| service.assess(&record));
    let payload = json!({
        "policy": policy,
        "assessment": assessment,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn cancel_policy_handler<S>(
    State(service): State<Arc<ScreeningService<S>>>,
) -> Response
where
    S: LedgerStore + 'static,
{
    let draft = service.cancel_policy_edit();
    (StatusCode::OK, axum::Json(draft)).into_response()
}
