use crate::cli::ServeArgs;
use crate::infra::{AppState, PlanningDefaults};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use finnvesta::config::AppConfig;
use finnvesta::error::AppError;
use finnvesta::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(Extension(PlanningDefaults(config.planning)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        trigger_threshold = config.planning.trigger_threshold,
        horizon = config.planning.planning_horizon_years,
        "finnvesta planning service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
