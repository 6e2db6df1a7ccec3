//! Checkout
//!
//! Orchestrates the payment flow: pricing a submitted form against live data,
//! creating and capturing the PayPal order, and reacting to PayPal webhooks.
//! Every path that marks an order paid goes through
//! [`OrdersService::mark_paid`](crate::domain::orders::OrdersService::mark_paid).

pub mod data;
pub mod errors;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
