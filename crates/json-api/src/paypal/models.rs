//! Checkout request and response models

use gallery::checkout::{CheckoutForm, CheckoutLine, Customer, ShippingAddress};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orders::models::{OrderResponse, TotalsResponse};

/// Customer contact details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<CustomerBody> for Customer {
    fn from(body: CustomerBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
        }
    }
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressBody {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        Self {
            line1: body.line1,
            line2: body.line2,
            city: body.city,
            postal_code: body.postal_code,
            country: body.country,
        }
    }
}

/// A requested line; the price is read from the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutLineBody {
    pub variant_id: Uuid,
    pub quantity: u32,
}

/// Create Order Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub customer: CustomerBody,
    pub shipping_address: ShippingAddressBody,
    pub items: Vec<CheckoutLineBody>,
}

impl From<CreateOrderRequest> for CheckoutForm {
    fn from(request: CreateOrderRequest) -> Self {
        Self {
            customer: request.customer.into(),
            shipping_address: request.shipping_address.into(),
            items: request
                .items
                .into_iter()
                .map(|line| CheckoutLine {
                    variant_id: line.variant_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// Create Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderResponse {
    /// Local order id
    pub order_id: Uuid,
    /// PayPal order id, passed to the PayPal buttons
    pub paypal_order_id: String,
    pub totals: TotalsResponse,
}

/// Capture Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptureOrderRequest {
    /// PayPal order id; `orderID` as sent by the PayPal SDK is accepted too
    #[serde(alias = "orderID", alias = "orderId")]
    pub paypal_order_id: String,
}

/// Capture Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptureOrderResponse {
    pub order: OrderResponse,
    /// The order had already been paid and nothing changed
    pub already_paid: bool,
}

/// Webhook acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookResponse {
    pub received: bool,
}
