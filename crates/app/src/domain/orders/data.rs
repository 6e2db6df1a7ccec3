//! Orders Data

use gallery::{
    checkout::{Customer, ShippingAddress},
    orders::{OrderLine, OrderStatus},
    totals::OrderTotals,
};

use crate::domain::orders::records::OrderUuid;

/// Default page size for order listings.
pub const DEFAULT_ORDER_LIMIT: u32 = 100;

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub totals: OrderTotals,
    pub paypal_order_id: String,
    pub items: Vec<OrderLine>,
}

/// Order listing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: u32,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_ORDER_LIMIT,
        }
    }
}
