use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rollcall_config::LoggingConfig;

use crate::middleware::route::{RouteLabel, status_class};

/// Response header echoing the id every log line of the request carries.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Runs the request inside a `request` span keyed by a fresh request id and
/// logs its outcome at a level chosen by status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = RouteLabel::of(&req);
    let request_id = uuid::Uuid::new_v4().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %route.method,
        route = %route.path,
    );

    async move {
        info!(path = %req.uri().path(), "Incoming request");

        let mut response = next.run(req).await;
        let status = response.status().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;

        match status_class(response.status()) {
            "4xx" => warn!(status, latency_ms, "Client error"),
            "5xx" => error!(status, latency_ms, "Server error"),
            _ => info!(status, latency_ms, "Request completed"),
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

/// Installs the global subscriber: a compact console layer, a daily error
/// log and a daily JSON log, both under `config.dir`.
///
/// `RUST_LOG` overrides the console filter when set.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{app}={level},rollcall_db={level},rollcall_auth={level},tower_http=warn,axum::rejection=trace",
            app = env!("CARGO_CRATE_NAME"),
            level = config.level,
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "rollcall.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &config.dir, "rollcall.json");

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()?;

    info!(log_dir = %config.dir.display(), "Tracing initialized");

    Ok(())
}
