use freshscore::config::AnimationConfig;
use freshscore::error::AppError;
use freshscore::freshness::{
    AnimationSource, DisabledAnimationSource, FreshnessDashboard, HttpAnimationSource, Theme,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type Dashboard = FreshnessDashboard<dyn AnimationSource>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dashboard: Arc<Dashboard>,
    pub(crate) default_theme: Theme,
}

pub(crate) fn animation_source(config: &AnimationConfig) -> Arc<dyn AnimationSource> {
    match &config.url {
        Some(url) => Arc::new(HttpAnimationSource::new(url.clone(), config.timeout)),
        None => Arc::new(DisabledAnimationSource),
    }
}

/// Runs a synchronous pipeline step on the blocking pool.
pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| AppError::Task(err.to_string()))?
}
