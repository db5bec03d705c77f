//! Logging setup.
//!
//! Console logging is always on. When an OTLP collector is configured and
//! answers a quick TCP probe, traces and log records are exported to it too.

use crate::config::TelemetryConfig;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnResponse, TraceLayer,
};
use tracing::{Level, Span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const PROBE_TIMEOUT: Duration = Duration::from_millis(100);

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_console() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Whether something is listening at the collector's host:port.
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok())
        .unwrap_or(false)
}

fn otel_providers(
    endpoint: &str,
    service_name: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), String> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| format!("trace exporter: {e}"))?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| format!("log exporter: {e}"))?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}

pub fn init(config: &TelemetryConfig) {
    let Some(endpoint) = config.otlp_endpoint.as_deref() else {
        init_console();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    if !collector_reachable(endpoint) {
        init_console();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    let (trace_provider, log_provider) = match otel_providers(endpoint, &config.service_name) {
        Ok(providers) => providers,
        Err(e) => {
            init_console();
            tracing::warn!("Failed to set up OpenTelemetry export ({}), using console logging only", e);
            return;
        }
    };

    let tracer = trace_provider.tracer(config.service_name.clone());
    opentelemetry::global::set_tracer_provider(trace_provider);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .init();

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        config.service_name
    );
}

/// Requests polled by health checks; they get no span and no log line.
const QUIET_PATHS: &[&str] = &["/api/test/ping"];

fn is_quiet(path: &str) -> bool {
    QUIET_PATHS.contains(&path)
}

/// Span and outcome logging for every HTTP request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLog;

pub type RequestTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestLog,
    (),
    RequestLog,
    DefaultOnBodyChunk,
    DefaultOnEos,
    RequestLog,
>;

pub fn trace_layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestLog)
        .on_request(())
        .on_response(RequestLog)
        .on_failure(RequestLog)
}

impl<B> MakeSpan<B> for RequestLog {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let path = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or(request.uri().path());

        if is_quiet(path) {
            return Span::none();
        }
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %path,
            query = request.uri().query().unwrap_or_default(),
        )
    }
}

impl<B> OnResponse<B> for RequestLog {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        // Server errors are reported by on_failure.
        if span.is_none() || response.status().is_server_error() {
            return;
        }
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis() as u64;
        if response.status().is_client_error() {
            tracing::event!(Level::WARN, status, latency_ms, "request rejected");
        } else {
            tracing::event!(Level::INFO, status, latency_ms, "request completed");
        }
    }
}

impl OnFailure<ServerErrorsFailureClass> for RequestLog {
    fn on_failure(&mut self, failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
        tracing::error!(
            error = %failure,
            latency_ms = latency.as_millis() as u64,
            "request failed"
        );
    }
}
