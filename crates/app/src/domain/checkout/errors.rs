//! Checkout errors.

use gallery::{checkout::FieldErrors, orders::OrderStatus, payments::CaptureStatus};
use thiserror::Error;

use crate::{
    domain::{
        orders::OrdersServiceError, settings::SettingsServiceError,
        variants::VariantsServiceError,
    },
    paypal::PayPalError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid checkout form")]
    InvalidForm(FieldErrors),

    #[error("Some products are not available")]
    ProductsUnavailable,

    #[error("Not enough stock for {title}")]
    InsufficientStock { title: String },

    #[error("order not found")]
    OrderNotFound,

    #[error("order is {0} and can no longer be paid")]
    NotPayable(OrderStatus),

    #[error("payment was not completed (status {0:?})")]
    PaymentNotCompleted(CaptureStatus),

    #[error("invalid webhook payload")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("webhook signature verification failed")]
    InvalidSignature,

    #[error("payment provider error")]
    Gateway(#[from] PayPalError),

    #[error("failed to access orders")]
    Orders(#[source] OrdersServiceError),

    #[error("failed to load variants")]
    Variants(#[from] VariantsServiceError),

    #[error("failed to load shipping settings")]
    Settings(#[from] SettingsServiceError),
}

impl From<OrdersServiceError> for CheckoutError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::OrderNotFound,
            other => Self::Orders(other),
        }
    }
}
