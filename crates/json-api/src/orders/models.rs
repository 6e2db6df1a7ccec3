//! Order response models

use std::string::ToString;

use gallery::totals::OrderTotals;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gallery_app::domain::orders::records::{OrderItemRecord, OrderRecord};

/// Order amounts, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
}

impl From<OrderTotals> for TotalsResponse {
    fn from(totals: OrderTotals) -> Self {
        Self {
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
        }
    }
}

/// Customer contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Delivery address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressResponse {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Ordered line, as priced at checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub variant_id: Uuid,
    pub title: String,
    pub quantity: u32,
    pub price: u64,
    pub total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            variant_id: item.variant_uuid.into_uuid(),
            title: item.title,
            quantity: item.quantity,
            price: item.price,
            total: item.total,
        }
    }
}

/// Order Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Local order id
    pub id: Uuid,

    /// `PENDING`, `PAID`, `PROCESSING`, `SHIPPED`, `DELIVERED`, `CANCELLED`
    /// or `REFUNDED`
    pub status: String,

    pub customer: CustomerResponse,

    pub shipping_address: AddressResponse,

    pub subtotal: u64,

    pub tax: u64,

    pub shipping: u64,

    pub total: u64,

    pub paypal_order_id: String,

    pub paypal_capture_id: Option<String>,

    pub items: Vec<OrderItemResponse>,

    pub created_at: String,

    pub updated_at: String,

    pub paid_at: Option<String>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into_uuid(),
            status: order.status.to_string(),
            customer: CustomerResponse {
                name: order.customer.name,
                email: order.customer.email,
                phone: order.customer.phone,
            },
            shipping_address: AddressResponse {
                line1: order.shipping_address.line1,
                line2: order.shipping_address.line2,
                city: order.shipping_address.city,
                postal_code: order.shipping_address.postal_code,
                country: order.shipping_address.country,
            },
            subtotal: order.totals.subtotal,
            tax: order.totals.tax,
            shipping: order.totals.shipping,
            total: order.totals.total,
            paypal_order_id: order.paypal_order_id,
            paypal_capture_id: order.paypal_capture_id,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
        }
    }
}
