//! App Router

use salvo::Router;

use crate::{admin, cart, healthcheck, orders, paypal};

/// Storefront routes, open to any client.
fn storefront_router() -> Router {
    Router::new()
        .push(Router::with_path("cart/validate").post(cart::validate::handler))
        .push(
            Router::with_path("paypal")
                .push(Router::with_path("create-order").post(paypal::create_order::handler))
                .push(Router::with_path("capture-order").post(paypal::capture_order::handler))
                .push(Router::with_path("webhook").post(paypal::webhook::handler)),
        )
        .push(Router::with_path("orders/{order}").get(orders::get::handler))
}

/// Back-office routes, behind the admin bearer token.
fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(admin::middleware::handler)
        .push(
            Router::with_path("orders")
                .get(admin::orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(admin::orders::get::handler)
                        .put(admin::orders::update::handler),
                ),
        )
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(storefront_router())
        .push(admin_router())
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        errors::ErrorResponse,
        test_helpers::{service_with, strict_app},
    };

    use super::*;

    #[tokio::test]
    async fn test_admin_routes_require_a_token() -> TestResult {
        let mut res = TestClient::get("http://example.com/admin/orders")
            .send(&service_with(strict_app(), app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.error, "Unauthorized");

        Ok(())
    }

    #[tokio::test]
    async fn test_storefront_routes_are_open() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&service_with(strict_app(), app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_method_is_a_json_405() -> TestResult {
        let mut res = TestClient::get("http://example.com/paypal/create-order")
            .send(&service_with(strict_app(), app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::METHOD_NOT_ALLOWED));
        assert_eq!(body.error, "Method not allowed");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_routes_are_json_404s() -> TestResult {
        let mut res = TestClient::get("http://example.com/paypal/refund")
            .send(&service_with(strict_app(), app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "Not found");

        Ok(())
    }
}
