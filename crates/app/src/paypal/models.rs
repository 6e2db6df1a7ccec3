//! Gateway request and response models

use gallery::{
    checkout::{Customer, ShippingAddress},
    orders::OrderLine,
    payments::CaptureStatus,
    totals::OrderTotals,
};

use crate::domain::orders::records::OrderUuid;

/// What to charge for, as computed by checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Local order id, used as the purchase unit reference.
    pub reference_id: OrderUuid,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
}

/// A provider order awaiting buyer approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOrder {
    pub id: String,
    pub status: String,
}

/// Outcome of a capture call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCapture {
    pub paypal_order_id: String,
    pub capture_id: String,
    pub status: CaptureStatus,
    /// Captured amount in minor units, when reported.
    pub amount: Option<u64>,
}

/// Transmission headers PayPal signs webhook notifications with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub auth_algo: String,
    pub cert_url: String,
    pub transmission_id: String,
    pub transmission_sig: String,
    pub transmission_time: String,
}
