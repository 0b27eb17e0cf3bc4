use crate::infra::{run_blocking, AppState};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use freshscore::error::AppError;
use freshscore::freshness::{ItemReading, PerishableCategory, Theme};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::error;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ThemeQuery {
    #[serde(default)]
    pub(crate) theme: Option<String>,
}

/// Fields posted by the dashboard form.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreForm {
    pub(crate) category: PerishableCategory,
    pub(crate) temperature: f64,
    pub(crate) humidity: u8,
    pub(crate) duration_hours: f64,
    pub(crate) distance_km: f64,
    pub(crate) door_openings: u8,
    #[serde(default)]
    pub(crate) theme: Option<String>,
}

pub(crate) fn dashboard_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/score", post(score_submission))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

pub(crate) async fn landing_page(
    State(state): State<AppState>,
    Query(query): Query<ThemeQuery>,
) -> Result<Html<String>, AppError> {
    let theme = Theme::resolve(query.theme.as_deref(), state.default_theme);
    let dashboard = state.dashboard.clone();
    let html = run_blocking(move || Ok(dashboard.landing(theme))).await?;
    Ok(Html(html))
}

pub(crate) async fn score_submission(
    State(state): State<AppState>,
    Form(form): Form<ScoreForm>,
) -> Result<Html<String>, AppError> {
    let ScoreForm {
        category,
        temperature,
        humidity,
        duration_hours,
        distance_km,
        door_openings,
        theme,
    } = form;

    let theme = Theme::resolve(theme.as_deref(), state.default_theme);
    let reading = ItemReading::new(
        category,
        temperature,
        humidity,
        duration_hours,
        distance_km,
        door_openings,
    )?;

    let dashboard = state.dashboard.clone();
    let html = run_blocking(move || {
        dashboard.render_submission(reading, theme).map_err(|err| {
            error!(error = %err, "scoring pipeline misconfigured");
            AppError::from(err)
        })
    })
    .await?;

    Ok(Html(html))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
