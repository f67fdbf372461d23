use crate::cli::ServeArgs;
use crate::infra::{ledger_store, AppState};
use crate::routes::with_screening_routes;
use admission_screening::config::AppConfig;
use admission_screening::error::AppError;
use admission_screening::screening::ScreeningService;
use admission_screening::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = ledger_store(&config);
    info!(directory = %store.dir().display(), "using file-backed audit ledger");
    let screening_service = Arc::new(ScreeningService::hydrate(store, config.policy.clone()));

    let app = with_screening_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
