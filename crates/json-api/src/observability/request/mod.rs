//! Per-request span, access log and HTTP metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths polled by infrastructure; not worth a span or a log line.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// What the access log needs once the response is known.
#[derive(Debug)]
struct RequestLine {
    request_id: String,
    method: String,
    path: String,
    route: String,
}

impl RequestLine {
    fn span(&self, span_name: &str, remote_addr: &str) -> Span {
        tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %span_name,
            otel.kind = "server",
            request_id = %self.request_id,
            method = %self.method,
            route = %self.route,
            path = %self.path,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        )
    }

    fn completed(&self, span: &Span, status: StatusCode, elapsed: Duration) {
        let duration_ms = elapsed.as_millis();
        let threshold = settings::slow_request_threshold();

        metrics::observe_request(&self.method, &self.route, status.as_u16(), elapsed.as_secs_f64());

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            if status.is_server_error() {
                error!(status = status.as_u16(), duration_ms, "request.failed");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), duration_ms, "request.rejected");
            } else {
                info!(status = status.as_u16(), duration_ms, "request.completed");
            }

            if elapsed > threshold {
                warn!(
                    duration_ms,
                    threshold_ms = threshold.as_millis(),
                    "slow request"
                );
            }
        });
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let label = spans::route_label(&method, &path);

    let line = RequestLine {
        request_id,
        method,
        path,
        route: label.route,
    };

    let _in_flight = metrics::InFlightRequestGuard::track();
    let span = line.span(&label.span_name, &req.remote_addr().to_string());

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach parent trace context: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    line.completed(
        &span,
        request_ids::response_status_or_ok(res.status_code),
        started.elapsed(),
    );
}
