//! Checkout Data

use gallery::{orders::OrderStatus, totals::OrderTotals};

use crate::{
    domain::orders::records::{OrderRecord, OrderUuid},
    paypal::WebhookHeaders,
};

/// Result of the first checkout step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCheckout {
    pub order_uuid: OrderUuid,
    pub paypal_order_id: String,
    pub totals: OrderTotals,
}

/// Result of capturing a payment.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedOrder {
    pub order: OrderRecord,
    /// `true` when the order had already been paid, by an earlier capture
    /// call or by the webhook, and nothing changed.
    pub already_paid: bool,
}

/// An inbound webhook call, as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookNotification {
    pub headers: WebhookHeaders,
    pub body: String,
}

/// What a webhook notification resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Event type the store does not act on.
    Ignored { event_type: String },
    /// Buyer approved; capture is driven by the client.
    Approved { paypal_order_id: String },
    /// Capture completed; `changed` is `false` when the order was already paid.
    Paid { order_uuid: OrderUuid, changed: bool },
    /// Capture denied; `changed` is `false` when the order was not pending.
    Cancelled { order_uuid: OrderUuid, changed: bool },
    /// Capture completed for an order that left `PENDING` without being paid.
    NotPayable {
        order_uuid: OrderUuid,
        status: OrderStatus,
    },
    /// No local order matches the notification.
    UnknownOrder { paypal_order_id: String },
}
