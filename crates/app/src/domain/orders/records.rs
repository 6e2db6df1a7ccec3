//! Order Records

use gallery::{
    checkout::{Customer, ShippingAddress},
    orders::{OrderLine, OrderStatus},
    totals::OrderTotals,
};
use jiff::Timestamp;

use crate::{domain::variants::records::VariantUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub status: OrderStatus,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub totals: OrderTotals,
    pub paypal_order_id: String,
    pub paypal_capture_id: Option<String>,
    pub items: Vec<OrderItemRecord>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub variant_uuid: VariantUuid,
    pub title: String,
    pub quantity: u32,
    pub price: u64,
    pub total: u64,
}

impl From<&OrderItemRecord> for OrderLine {
    fn from(item: &OrderItemRecord) -> Self {
        OrderLine::new(
            item.variant_uuid.into_uuid(),
            item.title.clone(),
            item.price,
            item.quantity,
        )
    }
}

/// Result of a conditional status update.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    /// The order as it is after the call.
    pub order: OrderRecord,
    /// `false` when the order was already past the expected status and
    /// nothing was written.
    pub changed: bool,
}
