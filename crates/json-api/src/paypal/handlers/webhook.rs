//! Webhook Handler

use std::sync::Arc;

use salvo::prelude::*;

use gallery_app::{
    domain::checkout::data::{WebhookNotification, WebhookOutcome},
    paypal::WebhookHeaders,
};

use crate::{
    extensions::*,
    observability::record_checkout_event,
    paypal::{errors::into_status_error, models::WebhookResponse},
    state::State,
};

fn header(req: &Request, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn transmission_headers(req: &Request) -> WebhookHeaders {
    WebhookHeaders {
        auth_algo: header(req, "paypal-auth-algo"),
        cert_url: header(req, "paypal-cert-url"),
        transmission_id: header(req, "paypal-transmission-id"),
        transmission_sig: header(req, "paypal-transmission-sig"),
        transmission_time: header(req, "paypal-transmission-time"),
    }
}

fn outcome_event(outcome: &WebhookOutcome) -> &'static str {
    match outcome {
        WebhookOutcome::Ignored { .. } => "webhook_ignored",
        WebhookOutcome::Approved { .. } => "webhook_approved",
        WebhookOutcome::Paid { changed: true, .. } => "webhook_paid",
        WebhookOutcome::Cancelled { changed: true, .. } => "webhook_cancelled",
        WebhookOutcome::Paid { .. } | WebhookOutcome::Cancelled { .. } => "webhook_replayed",
        WebhookOutcome::NotPayable { .. } => "webhook_not_payable",
        WebhookOutcome::UnknownOrder { .. } => "webhook_unknown_order",
    }
}

/// PayPal Webhook Handler
///
/// Verifies the notification with PayPal and applies capture events to the
/// matching order. The raw body is forwarded untouched so the signature can
/// be checked against it.
#[endpoint(
    tags("paypal"),
    summary = "PayPal Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Notification received"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or signature"),
        (status_code = StatusCode::BAD_GATEWAY, description = "PayPal request failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "paypal.webhook",
    skip(req, depot),
    fields(transmission_id = tracing::field::Empty, outcome = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WebhookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let headers = transmission_headers(req);

    let span = tracing::Span::current();

    span.record("transmission_id", headers.transmission_id.as_str());

    let payload = req.payload().await.or_400("Invalid webhook payload")?;
    let body = std::str::from_utf8(payload)
        .or_400("Invalid webhook payload")?
        .to_string();

    let outcome = match state
        .app
        .checkout
        .handle_webhook(WebhookNotification { headers, body })
        .await
    {
        Ok(outcome) => outcome,
        Err(error) => {
            record_checkout_event("webhook_rejected");

            return Err(into_status_error(error));
        }
    };

    let event = outcome_event(&outcome);

    span.record("outcome", event);
    record_checkout_event(event);

    Ok(Json(WebhookResponse { received: true }))
}
