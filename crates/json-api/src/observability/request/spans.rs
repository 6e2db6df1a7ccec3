//! Route labels for request spans and metrics.

use uuid::Uuid;

/// Top-level path segments served by this API. Anything else is labelled
/// `/{unmatched}` so scanners cannot inflate metric cardinality.
const KNOWN_ROOTS: [&str; 8] = [
    "healthcheck",
    "cart",
    "paypal",
    "orders",
    "admin",
    "metrics",
    "docs",
    "api-doc",
];

const UNMATCHED: &str = "/{unmatched}";

/// Span name (`METHOD /route`) and the route label it is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RouteLabel {
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn route_label(method: &str, path: &str) -> RouteLabel {
    let route = normalise(path);
    let span_name = format!("{method} {route}");

    RouteLabel { route, span_name }
}

fn normalise(path: &str) -> String {
    let mut segments = path.trim_matches('/').split('/');

    let Some(root) = segments.next().filter(|root| !root.is_empty()) else {
        return "/".to_owned();
    };

    if !KNOWN_ROOTS.contains(&root) {
        return UNMATCHED.to_owned();
    }

    let mut route = format!("/{root}");

    for segment in segments {
        route.push('/');

        if Uuid::parse_str(segment).is_ok() {
            route.push_str("{id}");
        } else {
            route.push_str(segment);
        }
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_ids_collapse_into_a_placeholder() {
        let label = route_label("GET", "/admin/orders/0190a8e4-7f1c-7d3e-9a55-3b8e5f0c1a01");

        assert_eq!(label.route, "/admin/orders/{id}");
        assert_eq!(label.span_name, "GET /admin/orders/{id}");
    }

    #[test]
    fn static_paths_are_kept() {
        assert_eq!(route_label("POST", "/paypal/capture-order").route, "/paypal/capture-order");
        assert_eq!(route_label("GET", "/").route, "/");
    }

    #[test]
    fn unknown_roots_share_one_label() {
        assert_eq!(route_label("GET", "/wp-login.php").route, "/{unmatched}");
        assert_eq!(route_label("GET", "/.env").route, "/{unmatched}");
    }
}
