//! W3C trace context from inbound headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The caller's span context, when the request carries a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let carrier = Headers(headers);

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so requests without trace headers get a new root.
        let context = propagator.extract_with_context(&Context::new(), &carrier);

        context
            .span()
            .span_context()
            .is_valid()
            .then(|| context.clone())
    })
}

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::header::HeaderValue;

    use super::*;

    #[test]
    fn reads_a_valid_traceparent() {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let mut headers = HeaderMap::new();

        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        let context = extract_parent_context(&headers);

        assert_eq!(
            context.map(|context| context.span().span_context().trace_id().to_string()),
            Some("4bf92f3577b34da6a3ce929d0e0e4736".to_string())
        );
    }

    #[test]
    fn missing_headers_start_a_new_trace() {
        assert!(extract_parent_context(&HeaderMap::new()).is_none());
    }
}
