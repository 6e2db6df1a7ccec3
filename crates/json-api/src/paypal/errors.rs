//! Errors

use gallery::checkout::FieldErrors;
use salvo::http::StatusError;
use tracing::{error, warn};

use gallery_app::{
    domain::{checkout::CheckoutError, orders::OrdersServiceError},
    paypal::PayPalError,
};

use crate::orders::errors::into_status_error as orders_status_error;

fn describe_fields(errors: &FieldErrors) -> String {
    let fields = errors
        .iter()
        .map(|error| format!("{} {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ");

    format!("Invalid checkout form: {fields}")
}

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::InvalidForm(errors) => StatusError::bad_request().brief(describe_fields(&errors)),
        CheckoutError::ProductsUnavailable | CheckoutError::InsufficientStock { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        CheckoutError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        CheckoutError::NotPayable(status) => StatusError::conflict()
            .brief(format!("Order is {status} and can no longer be paid")),
        CheckoutError::PaymentNotCompleted(status) => {
            warn!("capture did not complete: {status:?}");

            StatusError::bad_request().brief("Payment was not completed")
        }
        CheckoutError::InvalidPayload(source) => {
            warn!("rejected webhook payload: {source}");

            StatusError::bad_request().brief("Invalid webhook payload")
        }
        CheckoutError::InvalidSignature => {
            StatusError::bad_request().brief("Invalid webhook signature")
        }
        CheckoutError::Gateway(PayPalError::Rejected(reason)) => {
            warn!("PayPal rejected the request: {reason}");

            StatusError::bad_request().brief("Payment was declined")
        }
        CheckoutError::Gateway(source) => {
            error!("PayPal request failed: {source}");

            StatusError::bad_gateway().brief("Payment provider error")
        }
        CheckoutError::Orders(OrdersServiceError::InvalidTransition { from, to }) => {
            orders_status_error(OrdersServiceError::InvalidTransition { from, to })
        }
        CheckoutError::Orders(source) => {
            error!("failed to access orders during checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutError::Variants(source) => {
            error!("failed to load variants during checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutError::Settings(source) => {
            error!("failed to load shipping settings during checkout: {source}");

            StatusError::internal_server_error()
        }
    }
}
