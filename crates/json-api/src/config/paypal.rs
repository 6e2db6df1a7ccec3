//! PayPal Config

use std::time::Duration;

use clap::Args;
use gallery_app::paypal::{PayPalConfig, SANDBOX_API_BASE};

/// PayPal REST settings.
#[derive(Debug, Args)]
pub struct PayPalSettings {
    /// PayPal REST API base URL (sandbox or live)
    #[arg(long, env = "PAYPAL_API_BASE", default_value = SANDBOX_API_BASE)]
    pub paypal_api_base: String,

    /// PayPal REST client id
    #[arg(long, env = "PAYPAL_CLIENT_ID")]
    pub paypal_client_id: String,

    /// PayPal REST client secret
    #[arg(long, env = "PAYPAL_CLIENT_SECRET", hide_env_values = true)]
    pub paypal_client_secret: String,

    /// Webhook id used to verify notification signatures
    #[arg(long, env = "PAYPAL_WEBHOOK_ID")]
    pub paypal_webhook_id: Option<String>,

    /// Timeout for outbound PayPal requests, in seconds
    #[arg(long, env = "PAYPAL_TIMEOUT_SECONDS", default_value_t = 15_u64)]
    pub paypal_timeout_seconds: u64,

    /// Public storefront URL used for the approval return and cancel links
    #[arg(long, env = "SHOP_BASE_URL")]
    pub shop_base_url: Option<String>,
}

impl PayPalSettings {
    /// Client configuration for the payment gateway.
    #[must_use]
    pub fn into_client_config(self) -> PayPalConfig {
        PayPalConfig {
            api_base: self.paypal_api_base,
            client_id: self.paypal_client_id,
            client_secret: self.paypal_client_secret,
            webhook_id: self.paypal_webhook_id.filter(|id| !id.trim().is_empty()),
            shop_base_url: self.shop_base_url,
            timeout: Duration::from_secs(self.paypal_timeout_seconds),
        }
    }
}
