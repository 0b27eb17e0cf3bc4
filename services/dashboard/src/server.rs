use crate::cli::ServeArgs;
use crate::infra::{animation_source, AppState, Dashboard};
use crate::routes::dashboard_router;
use axum_prometheus::PrometheusMetricLayer;
use freshscore::config::AppConfig;
use freshscore::error::AppError;
use freshscore::freshness::{FreshnessDashboard, ScoringModel};
use freshscore::telemetry;
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

    let scoring = config.scoring.clone();
    let dashboard: Dashboard = FreshnessDashboard::new(
        ScoringModel::new(scoring),
        animation_source(&config.animation),
    );

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        dashboard: Arc::new(dashboard),
        default_theme: config.dashboard.default_theme,
    };

    // Fetched once in the background; pages render without it until it lands.
    let warmup = Arc::clone(&app_state.dashboard);
    tokio::task::spawn_blocking(move || {
        warmup.prefetch_animation();
    });

    let app = dashboard_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        trees = config.scoring.trees,
        samples = config.scoring.samples,
        animation = config.animation.url.is_some(),
        "freshscore dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
