use admission_screening::config::AppConfig;
use admission_screening::error::AppError;
use admission_screening::screening::{ApplicationRecord, FileLedgerStore, ScreeningService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn ledger_store(config: &AppConfig) -> Arc<FileLedgerStore> {
    Arc::new(FileLedgerStore::new(config.ledger.directory.clone()))
}

/// CLI commands refuse to run against a ledger they cannot read rather than overwrite it.
pub(crate) fn open_service(
    config: &AppConfig,
) -> Result<ScreeningService<FileLedgerStore>, AppError> {
    let service = ScreeningService::open(ledger_store(config), config.policy.clone())?;
    Ok(service)
}

pub(crate) fn read_record(path: &Path) -> Result<ApplicationRecord, AppError> {
    let raw = fs::read_to_string(path)?;
    let record = serde_json::from_str(&raw)?;
    Ok(record)
}
