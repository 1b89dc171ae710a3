//! HTTP server for the interactive dashboard
//!
//! Routes:
//! - `GET /`: dashboard page
//! - `GET /healthz`: liveness
//! - `GET /api/summary`: dataset summary (sites, payload bounds, counts)
//! - `GET /api/charts/proportion?site=`: proportion figure
//! - `GET /api/charts/correlation?site=&low=&high=`: correlation figure

use crate::binder::{self, DashboardState};
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::filter::{self, PayloadRange, SiteFilter};
use crate::html_output::HtmlOutput;
use crate::stats::DatasetSummary;
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Shared, read-only server state
#[derive(Debug, Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Build the dashboard router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(healthz_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/charts/proportion", get(proportion_handler))
        .route("/api/charts/correlation", get(correlation_handler))
        .with_state(state)
}

/// Error response with a JSON body
fn bad_request(message: String) -> Response {
    warn!(%message, "rejected chart request");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn site_param(params: &HashMap<String, String>) -> SiteFilter {
    params
        .get("site")
        .map(|s| SiteFilter::from_selection(s))
        .unwrap_or_default()
}

/// Parse an optional numeric query parameter, falling back to `default`
fn mass_param(
    params: &HashMap<String, String>,
    name: &str,
    default: f64,
) -> std::result::Result<f64, String> {
    match params.get(name).map(|s| s.trim()) {
        None | Some("") => Ok(default),
        Some(raw) => filter::parse_mass(raw)
            .map_err(|_| format!("invalid {name}: {raw:?} is not a finite number")),
    }
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let dataset = state.dataset();
    Html(HtmlOutput::new(dataset, DashboardState::initial(dataset)).to_html())
}

async fn healthz_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn summary_handler(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(DatasetSummary::from_dataset(state.dataset()))
}

async fn proportion_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let site = site_param(&params);
    let figure = binder::proportion_chart(state.dataset(), &site);
    debug!(
        site = site.selection(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "served proportion chart"
    );
    Json(figure).into_response()
}

async fn correlation_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let dataset = state.dataset();
    let (min, max) = dataset.payload_bounds().unwrap_or((0.0, 0.0));

    let low = match mass_param(&params, "low", min) {
        Ok(v) => v,
        Err(message) => return bad_request(message),
    };
    let high = match mass_param(&params, "high", max) {
        Ok(v) => v,
        Err(message) => return bad_request(message),
    };

    let site = site_param(&params);
    let figure = binder::correlation_chart(dataset, &site, PayloadRange::new(low, high));
    debug!(
        site = site.selection(),
        low,
        high,
        points = figure.point_count(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "served correlation chart"
    );
    Json(figure).into_response()
}

/// Wait for Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Load the dataset and serve the dashboard until Ctrl-C
pub async fn serve(config: &DashboardConfig) -> Result<()> {
    let dataset = Dataset::load(&config.data_path)
        .with_context(|| format!("cannot start dashboard without {}", config.data_path.display()))?;

    let app = build_router(AppState::new(dataset));
    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("launchdash listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")
}
