//! PayPal REST payloads

use gallery::{
    money::{AmountError, CURRENCY, format_amount, parse_amount},
    payments::CaptureStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    errors::PayPalError,
    models::{PaymentRequest, ProviderCapture, WebhookHeaders},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct Money {
    pub(super) currency_code: String,
    pub(super) value: String,
}

impl Money {
    fn from_minor(minor: u64) -> Result<Self, AmountError> {
        Ok(Self {
            currency_code: CURRENCY.iso_alpha_code.to_string(),
            value: format_amount(minor)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateOrderBody {
    pub(super) intent: &'static str,
    pub(super) purchase_units: Vec<PurchaseUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) application_context: Option<ApplicationContext>,
}

#[derive(Debug, Serialize)]
pub(super) struct PurchaseUnit {
    pub(super) reference_id: String,
    pub(super) amount: Amount,
    pub(super) items: Vec<Item>,
    pub(super) shipping: Shipping,
}

#[derive(Debug, Serialize)]
pub(super) struct Amount {
    pub(super) currency_code: String,
    pub(super) value: String,
    pub(super) breakdown: Breakdown,
}

#[derive(Debug, Serialize)]
pub(super) struct Breakdown {
    pub(super) item_total: Money,
    pub(super) tax_total: Money,
    pub(super) shipping: Money,
}

#[derive(Debug, Serialize)]
pub(super) struct Item {
    pub(super) name: String,
    pub(super) sku: String,
    pub(super) quantity: String,
    pub(super) unit_amount: Money,
    pub(super) category: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct Shipping {
    pub(super) name: ShippingName,
    pub(super) address: Address,
}

#[derive(Debug, Serialize)]
pub(super) struct ShippingName {
    pub(super) full_name: String,
}

#[derive(Debug, Serialize)]
pub(super) struct Address {
    pub(super) address_line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) address_line_2: Option<String>,
    pub(super) admin_area_2: String,
    pub(super) postal_code: String,
    pub(super) country_code: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ApplicationContext {
    pub(super) return_url: String,
    pub(super) cancel_url: String,
    pub(super) shipping_preference: &'static str,
    pub(super) user_action: &'static str,
}

impl ApplicationContext {
    pub(super) fn for_shop(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');

        Self {
            return_url: format!("{base_url}/checkout/success"),
            cancel_url: format!("{base_url}/checkout/cancel"),
            shipping_preference: "SET_PROVIDED_ADDRESS",
            user_action: "PAY_NOW",
        }
    }
}

impl CreateOrderBody {
    pub(super) fn new(
        request: &PaymentRequest,
        application_context: Option<ApplicationContext>,
    ) -> Result<Self, AmountError> {
        let totals = &request.totals;

        let items = request
            .lines
            .iter()
            .map(|line| {
                Ok(Item {
                    name: line.title.clone(),
                    sku: line.variant_id.to_string(),
                    quantity: line.quantity.to_string(),
                    unit_amount: Money::from_minor(line.price)?,
                    category: "PHYSICAL_GOODS",
                })
            })
            .collect::<Result<Vec<_>, AmountError>>()?;

        let address = &request.shipping_address;

        Ok(Self {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                reference_id: request.reference_id.to_string(),
                amount: Amount {
                    currency_code: CURRENCY.iso_alpha_code.to_string(),
                    value: format_amount(totals.total)?,
                    breakdown: Breakdown {
                        item_total: Money::from_minor(totals.subtotal)?,
                        tax_total: Money::from_minor(totals.tax)?,
                        shipping: Money::from_minor(totals.shipping)?,
                    },
                },
                items,
                shipping: Shipping {
                    name: ShippingName {
                        full_name: request.customer.name.clone(),
                    },
                    address: Address {
                        address_line_1: address.line1.clone(),
                        address_line_2: address.line2.clone(),
                        admin_area_2: address.city.clone(),
                        postal_code: address.postal_code.clone(),
                        country_code: address.country.to_uppercase(),
                    },
                },
            }],
            application_context,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OrderResponse {
    pub(super) id: String,
    pub(super) status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CaptureResponse {
    pub(super) id: String,
    pub(super) status: String,
    #[serde(default)]
    pub(super) purchase_units: Vec<CapturedUnit>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CapturedUnit {
    #[serde(default)]
    pub(super) payments: Option<CapturedPayments>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CapturedPayments {
    #[serde(default)]
    pub(super) captures: Vec<CaptureDetail>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CaptureDetail {
    pub(super) id: String,
    pub(super) status: CaptureStatus,
    #[serde(default)]
    pub(super) amount: Option<Money>,
}

impl TryFrom<CaptureResponse> for ProviderCapture {
    type Error = PayPalError;

    fn try_from(response: CaptureResponse) -> Result<Self, Self::Error> {
        let capture = response
            .purchase_units
            .into_iter()
            .filter_map(|unit| unit.payments)
            .flat_map(|payments| payments.captures)
            .next()
            .ok_or_else(|| {
                PayPalError::UnexpectedResponse(format!(
                    "capture of order {} (status {}) returned no captures",
                    response.id, response.status
                ))
            })?;

        let amount = capture
            .amount
            .map(|amount| parse_amount(&amount.value))
            .transpose()?;

        Ok(Self {
            paypal_order_id: response.id,
            capture_id: capture.id,
            status: capture.status,
            amount,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
    pub(super) expires_in: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct VerifyWebhookBody {
    pub(super) auth_algo: String,
    pub(super) cert_url: String,
    pub(super) transmission_id: String,
    pub(super) transmission_sig: String,
    pub(super) transmission_time: String,
    pub(super) webhook_id: String,
    pub(super) webhook_event: Value,
}

impl VerifyWebhookBody {
    pub(super) fn new(headers: WebhookHeaders, webhook_id: String, event: Value) -> Self {
        Self {
            auth_algo: headers.auth_algo,
            cert_url: headers.cert_url,
            transmission_id: headers.transmission_id,
            transmission_sig: headers.transmission_sig,
            transmission_time: headers.transmission_time,
            webhook_id,
            webhook_event: event,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct VerifyWebhookResponse {
    pub(super) verification_status: String,
}

impl VerifyWebhookResponse {
    pub(super) fn is_verified(&self) -> bool {
        self.verification_status == "SUCCESS"
    }
}
