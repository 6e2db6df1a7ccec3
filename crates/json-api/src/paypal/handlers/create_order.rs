//! Create Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::record_checkout_event,
    paypal::{
        errors::into_status_error,
        models::{CreateOrderRequest, CreateOrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Prices the submitted cart from the catalog, creates the PayPal order and
/// stores the local order as `PENDING`.
#[endpoint(
    tags("paypal"),
    summary = "Create PayPal Order",
    responses(
        (status_code = StatusCode::OK, description = "PayPal order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid form or unavailable stock"),
        (status_code = StatusCode::BAD_GATEWAY, description = "PayPal request failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "paypal.create_order",
    skip(json, depot),
    fields(items = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<CreateOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("items", request.items.len());

    let created = match state.app.checkout.create_order(request.into()).await {
        Ok(created) => created,
        Err(error) => {
            record_checkout_event("create_failed");

            return Err(into_status_error(error));
        }
    };

    record_checkout_event("created");

    span.record("order_uuid", tracing::field::display(created.order_uuid));

    Ok(Json(CreateOrderResponse {
        order_id: created.order_uuid.into_uuid(),
        paypal_order_id: created.paypal_order_id,
        totals: created.totals.into(),
    }))
}

#[cfg(test)]
mod tests {
    use gallery::totals::OrderTotals;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use gallery_app::domain::{
        checkout::{CheckoutError, MockCheckoutService, data::CreatedCheckout},
        orders::records::OrderUuid,
    };

    use crate::{errors::ErrorResponse, test_helpers::checkout_service};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("paypal/create-order").post(handler))
    }

    fn form(variant_id: Uuid, quantity: u32) -> Value {
        json!({
            "customer": { "name": "Ada Lovelace", "email": "ada@example.com" },
            "shippingAddress": {
                "line1": "Calle Mayor 1",
                "city": "Madrid",
                "postalCode": "28013",
                "country": "ES"
            },
            "items": [{ "variantId": variant_id, "quantity": quantity }]
        })
    }

    #[tokio::test]
    async fn test_create_order_returns_paypal_id_and_totals() -> TestResult {
        let variant_id = Uuid::now_v7();
        let order_uuid = OrderUuid::new();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_create_order()
            .once()
            .withf(move |form| {
                form.customer.email == "ada@example.com"
                    && form.shipping_address.postal_code == "28013"
                    && form.items.len() == 1
                    && form.items.first().map(|line| (line.variant_id, line.quantity))
                        == Some((variant_id, 2))
            })
            .return_once(move |_| {
                Ok(CreatedCheckout {
                    order_uuid,
                    paypal_order_id: "PAYPAL-1".to_string(),
                    totals: OrderTotals {
                        subtotal: 2_000,
                        tax: 420,
                        shipping: 500,
                        total: 2_920,
                    },
                })
            });

        let mut res = TestClient::post("http://example.com/paypal/create-order")
            .json(&form(variant_id, 2))
            .send(&make_service(checkout))
            .await;

        let body: CreateOrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.order_id, order_uuid.into_uuid());
        assert_eq!(body.paypal_order_id, "PAYPAL-1");
        assert_eq!(body.totals.tax, 420);
        assert_eq!(body.totals.total, 2_920);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_is_bad_request() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_create_order().once().return_once(|_| {
            Err(CheckoutError::InsufficientStock {
                title: "Blue Hour, A3".to_string(),
            })
        });

        let mut res = TestClient::post("http://example.com/paypal/create-order")
            .json(&form(Uuid::now_v7(), 9))
            .send(&make_service(checkout))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Not enough stock for Blue Hour, A3");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_checkout() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_create_order().never();

        let res = TestClient::post("http://example.com/paypal/create-order")
            .json(&json!({ "items": [] }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
