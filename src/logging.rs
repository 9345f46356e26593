use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const LOG_DIR: &str = "storage/logs";

/// Wraps each request in a span carrying a fresh request id, then logs the
/// outcome at a level chosen by status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        path = %path,
    );

    async move {
        let start = Instant::now();
        let response = next.run(req).await;
        let status = response.status().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;

        match status {
            500..=599 => error!(status, latency_ms, "Server error"),
            400..=499 => warn!(status, latency_ms, "Client error"),
            _ => info!(status, latency_ms, "Request completed"),
        }

        response
    }
    .instrument(span)
    .await
}

/// Installs the global subscriber: a compact console layer filtered by
/// `RUST_LOG`, and a daily-rolling JSON file under `storage/logs`.
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the lifetime of the process.
pub fn init_tracing() -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(LOG_DIR)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,farmmarket_auth=info,tower_http=warn,sqlx=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let json_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "farmmarket.json");
    let (json_writer, guard) = tracing_appender::non_blocking(json_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
