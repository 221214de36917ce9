use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::middleware::route::{RouteLabel, status_class};
use crate::state::AppState;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is disabled. Must run inside a Tokio
/// runtime.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5,
                10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Holds one unit of `http_requests_active` for a route until dropped, so
/// the gauge comes back down even when the inner service unwinds.
struct ActiveRequestGuard {
    method: String,
    path: String,
}

impl ActiveRequestGuard {
    fn enter(route: &RouteLabel) -> Self {
        gauge!("http_requests_active", "method" => route.method.clone(), "path" => route.path.clone())
            .increment(1.0);
        Self {
            method: route.method.clone(),
            path: route.path.clone(),
        }
    }
}

impl Drop for ActiveRequestGuard {
    fn drop(&mut self) {
        gauge!("http_requests_active", "method" => self.method.clone(), "path" => self.path.clone())
            .decrement(1.0);
    }
}

/// Records request counts, latency and in-flight requests per route template.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let route = RouteLabel::of(&req);
    let _active = ActiveRequestGuard::enter(&route);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status();

    counter!(
        "http_requests_total",
        "method" => route.method.clone(),
        "path" => route.path.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => route.method, "path" => route.path)
        .record(latency);
    counter!("http_requests_by_status", "status_category" => status_class(status)).increment(1);

    response
}

/// `GET /metrics`: Prometheus text exposition, or 404 when no recorder is
/// installed.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// Business metrics helpers

pub fn track_login_success() {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_logins_total", "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_logins_total", "status" => "failure", "reason" => reason.to_string())
        .increment(1);
}

pub fn track_token_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total").increment(1);
}

pub fn track_user_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_created_total").increment(1);
}

pub fn track_user_deleted() {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_deleted_total").increment(1);
}
