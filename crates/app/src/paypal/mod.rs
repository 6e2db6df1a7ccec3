//! PayPal payment gateway
//!
//! [`PaymentGateway`] is the seam the checkout flow talks to; [`PayPalClient`]
//! implements it against the PayPal REST API.

mod client;
mod errors;
mod models;
mod wire;

use async_trait::async_trait;
use mockall::automock;

pub use client::{DEFAULT_TIMEOUT, PayPalClient, PayPalConfig, SANDBOX_API_BASE};
pub use errors::PayPalError;
pub use models::{PaymentRequest, ProviderCapture, ProviderOrder, WebhookHeaders};

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a provider order (intent `CAPTURE`) the buyer can approve.
    async fn create_order(&self, request: PaymentRequest) -> Result<ProviderOrder, PayPalError>;

    /// Capture an approved provider order.
    ///
    /// `request_id` is sent as the idempotency key, so retrying with the same
    /// value never charges twice.
    async fn capture_order(
        &self,
        paypal_order_id: String,
        request_id: String,
    ) -> Result<ProviderCapture, PayPalError>;

    /// Check a webhook notification's signature.
    ///
    /// Returns `Ok(true)` without calling the provider when no webhook id is
    /// configured.
    async fn verify_webhook(
        &self,
        headers: WebhookHeaders,
        event: serde_json::Value,
    ) -> Result<bool, PayPalError>;
}
