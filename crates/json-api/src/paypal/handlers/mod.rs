//! PayPal Handlers

pub(crate) mod capture_order;
pub(crate) mod create_order;
pub(crate) mod webhook;
