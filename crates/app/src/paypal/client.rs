//! PayPal REST client

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{
    PaymentGateway,
    errors::PayPalError,
    models::{PaymentRequest, ProviderCapture, ProviderOrder, WebhookHeaders},
    wire::{
        ApplicationContext, CaptureResponse, CreateOrderBody, OrderResponse, TokenResponse,
        VerifyWebhookBody, VerifyWebhookResponse,
    },
};

/// PayPal sandbox REST endpoint.
pub const SANDBOX_API_BASE: &str = "https://api-m.sandbox.paypal.com";

/// Default timeout for every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Access tokens are refreshed this long before PayPal expires them.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Configuration for connecting to PayPal.
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST base URL, sandbox or live.
    pub api_base: String,

    pub client_id: String,

    pub client_secret: String,

    /// Webhook id used to verify notification signatures. Notifications are
    /// accepted unverified when unset.
    pub webhook_id: Option<String>,

    /// Public storefront URL the buyer returns to after approval.
    pub shop_base_url: Option<String>,

    pub timeout: Duration,
}

impl Debug for PayPalConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PayPalConfig")
            .field("api_base", &self.api_base)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("webhook_id", &self.webhook_id)
            .field("shop_base_url", &self.shop_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

struct AccessToken {
    value: String,
    refresh_at: Instant,
}

impl AccessToken {
    /// A lifetime past what `Instant` can represent yields a token that is
    /// already stale.
    fn issued(response: TokenResponse, now: Instant) -> Self {
        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);

        Self {
            value: response.access_token,
            refresh_at: now.checked_add(lifetime).unwrap_or(now),
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_at
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AccessToken")
            .field("refresh_at", &self.refresh_at)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the PayPal Orders and Webhooks APIs.
#[derive(Debug, Clone)]
pub struct PayPalClient {
    config: PayPalConfig,
    http: Client,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl PayPalClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: PayPalConfig) -> Result<Self, PayPalError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http,
            token: Arc::new(Mutex::new(None)),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base.trim_end_matches('/'))
    }

    /// A valid OAuth2 access token, fetched with client credentials when the
    /// cached one is missing or about to expire.
    async fn access_token(&self) -> Result<String, PayPalError> {
        let mut cached = self.token.lock().await;
        let now = Instant::now();

        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        debug!("requesting PayPal access token");

        let response = self
            .http
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let parsed: TokenResponse = ensure_success(response, "token").await?.json().await?;
        let token = AccessToken::issued(parsed, now);
        let value = token.value.clone();

        *cached = Some(token);

        Ok(value)
    }
}

#[async_trait]
impl PaymentGateway for PayPalClient {
    async fn create_order(&self, request: PaymentRequest) -> Result<ProviderOrder, PayPalError> {
        let context = self
            .config
            .shop_base_url
            .as_deref()
            .map(ApplicationContext::for_shop);

        let body = CreateOrderBody::new(&request, context)?;
        let token = self.access_token().await?;

        let response = self
            .http
            .post(self.url("/v2/checkout/orders"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let parsed: OrderResponse = ensure_success(response, "create order").await?.json().await?;

        info!(
            paypal_order_id = %parsed.id,
            reference_id = %request.reference_id,
            total = request.totals.total,
            "created PayPal order"
        );

        Ok(ProviderOrder {
            id: parsed.id,
            status: parsed.status,
        })
    }

    async fn capture_order(
        &self,
        paypal_order_id: String,
        request_id: String,
    ) -> Result<ProviderCapture, PayPalError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(self.url(&format!("/v2/checkout/orders/{paypal_order_id}/capture")))
            .bearer_auth(token)
            .header("PayPal-Request-Id", request_id)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let parsed: CaptureResponse = ensure_success(response, "capture").await?.json().await?;
        let capture = ProviderCapture::try_from(parsed)?;

        info!(
            paypal_order_id = %capture.paypal_order_id,
            capture_id = %capture.capture_id,
            status = ?capture.status,
            "captured PayPal order"
        );

        Ok(capture)
    }

    async fn verify_webhook(
        &self,
        headers: WebhookHeaders,
        event: Value,
    ) -> Result<bool, PayPalError> {
        let Some(webhook_id) = self.config.webhook_id.clone() else {
            warn!("no PayPal webhook id configured, accepting notification unverified");

            return Ok(true);
        };

        let token = self.access_token().await?;

        let response = self
            .http
            .post(self.url("/v1/notifications/verify-webhook-signature"))
            .bearer_auth(token)
            .json(&VerifyWebhookBody::new(headers, webhook_id, event))
            .send()
            .await?;

        let parsed: VerifyWebhookResponse = ensure_success(response, "verify webhook")
            .await?
            .json()
            .await?;

        Ok(parsed.is_verified())
    }
}

async fn ensure_success(response: Response, operation: &str) -> Result<Response, PayPalError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(PayPalError::Rejected(format!("{operation}: {text}")));
    }

    Err(PayPalError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    )))
}
