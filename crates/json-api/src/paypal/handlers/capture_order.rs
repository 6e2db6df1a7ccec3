//! Capture Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::record_checkout_event,
    paypal::{
        errors::into_status_error,
        models::{CaptureOrderRequest, CaptureOrderResponse},
    },
    state::State,
};

/// Capture Order Handler
///
/// Captures an approved PayPal order and marks the local order paid. Calling
/// it again for a paid order returns the order with `alreadyPaid` set.
#[endpoint(
    tags("paypal"),
    summary = "Capture PayPal Order",
    responses(
        (status_code = StatusCode::OK, description = "Payment captured"),
        (status_code = StatusCode::BAD_REQUEST, description = "Payment not completed"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order can no longer be paid"),
        (status_code = StatusCode::BAD_GATEWAY, description = "PayPal request failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "paypal.capture_order",
    skip(json, depot),
    fields(paypal_order_id = tracing::field::Empty, already_paid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CaptureOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<CaptureOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let paypal_order_id = json.into_inner().paypal_order_id;

    let span = tracing::Span::current();

    span.record("paypal_order_id", paypal_order_id.as_str());

    let captured = match state.app.checkout.capture_order(paypal_order_id).await {
        Ok(captured) => captured,
        Err(error) => {
            record_checkout_event("capture_failed");

            return Err(into_status_error(error));
        }
    };

    span.record("already_paid", captured.already_paid);

    record_checkout_event(if captured.already_paid {
        "capture_replayed"
    } else {
        "captured"
    });

    Ok(Json(CaptureOrderResponse {
        order: captured.order.into(),
        already_paid: captured.already_paid,
    }))
}
