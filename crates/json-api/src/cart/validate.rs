//! Validate Cart Handler

use std::sync::Arc;

use gallery::{
    cart::CartItem,
    totals::ShippingSettings,
    validation::{CartIssue, CartIssueKind, CartValidation},
};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gallery_app::domain::cart_validation::CartValidationRequest;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Shipping settings, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingSettingsBody {
    pub standard_rate: u64,
    pub free_shipping_threshold: u64,
}

impl From<ShippingSettingsBody> for ShippingSettings {
    fn from(body: ShippingSettingsBody) -> Self {
        Self {
            standard_rate: body.standard_rate,
            free_shipping_threshold: body.free_shipping_threshold,
        }
    }
}

impl From<ShippingSettings> for ShippingSettingsBody {
    fn from(settings: ShippingSettings) -> Self {
        Self {
            standard_rate: settings.standard_rate,
            free_shipping_threshold: settings.free_shipping_threshold,
        }
    }
}

/// A cart line as stored by the client
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemBody {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    /// Unit price the client last saw, in minor units
    pub price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub stock: Option<u32>,
}

impl From<CartItemBody> for CartItem {
    fn from(item: CartItemBody) -> Self {
        Self {
            variant_id: item.variant_id,
            product_id: item.product_id,
            title: item.title,
            price: item.price,
            quantity: item.quantity,
            image_url: item.image_url,
            slug: item.slug,
            stock: item.stock,
        }
    }
}

/// Validate Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidateCartRequest {
    pub items: Vec<CartItemBody>,

    /// Shipping settings the client last saw; shipping is not compared when
    /// omitted
    #[serde(default)]
    pub known_shipping: Option<ShippingSettingsBody>,
}

impl From<ValidateCartRequest> for CartValidationRequest {
    fn from(request: ValidateCartRequest) -> Self {
        Self {
            items: request.items.into_iter().map(Into::into).collect(),
            known_shipping: request.known_shipping.map(Into::into),
        }
    }
}

/// A difference between the cart and the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartIssueBody {
    /// `stock_unavailable`, `stock_reduced`, `price_changed`,
    /// `product_unavailable` or `shipping_changed`
    pub kind: String,
    pub variant_id: Option<Uuid>,
    pub message: String,
    pub current: Option<u64>,
    pub previous: Option<u64>,
}

fn kind_name(kind: CartIssueKind) -> &'static str {
    match kind {
        CartIssueKind::StockUnavailable => "stock_unavailable",
        CartIssueKind::StockReduced => "stock_reduced",
        CartIssueKind::PriceChanged => "price_changed",
        CartIssueKind::ProductUnavailable => "product_unavailable",
        CartIssueKind::ShippingChanged => "shipping_changed",
    }
}

impl From<CartIssue> for CartIssueBody {
    fn from(issue: CartIssue) -> Self {
        Self {
            kind: kind_name(issue.kind).to_string(),
            variant_id: issue.variant_id,
            message: issue.message,
            current: issue.current,
            previous: issue.previous,
        }
    }
}

/// Validate Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateCartResponse {
    pub valid: bool,
    pub issues: Vec<CartIssueBody>,
    pub shipping: ShippingSettingsBody,
}

impl From<CartValidation> for ValidateCartResponse {
    fn from(validation: CartValidation) -> Self {
        Self {
            valid: validation.valid,
            issues: validation.issues.into_iter().map(Into::into).collect(),
            shipping: validation.shipping.into(),
        }
    }
}

/// Validate Cart Handler
///
/// Compares a cart against live prices, stock and shipping settings. Nothing
/// is changed; the client decides how to resolve each issue.
#[endpoint(
    tags("cart"),
    summary = "Validate Cart",
    responses(
        (status_code = StatusCode::OK, description = "Validation result"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.validate",
    skip(json, depot),
    fields(items = tracing::field::Empty, issues = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateCartRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidateCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request: CartValidationRequest = json.into_inner().into();

    let span = tracing::Span::current();

    span.record("items", request.items.len());

    let validation = state
        .app
        .cart_validation
        .validate_cart(request)
        .await
        .map_err(into_status_error)?;

    span.record("issues", validation.issues.len());

    Ok(Json(validation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use gallery_app::domain::cart_validation::MockCartValidationService;

    use crate::test_helpers::cart_validation_service;

    use super::*;

    fn make_service(cart_validation: MockCartValidationService) -> Service {
        cart_validation_service(cart_validation, Router::with_path("cart/validate").post(handler))
    }

    #[tokio::test]
    async fn test_validate_reports_price_changes() -> TestResult {
        let variant_id = Uuid::now_v7();

        let mut cart_validation = MockCartValidationService::new();

        cart_validation
            .expect_validate_cart()
            .once()
            .withf(move |request| {
                request.items.len() == 1
                    && request.items.first().map(|item| item.variant_id) == Some(variant_id)
                    && request.known_shipping
                        == Some(ShippingSettings {
                            standard_rate: 500,
                            free_shipping_threshold: 5_000,
                        })
            })
            .return_once(move |_| {
                Ok(CartValidation {
                    valid: false,
                    issues: vec![CartIssue {
                        kind: CartIssueKind::PriceChanged,
                        variant_id: Some(variant_id),
                        message: "Price changed".to_string(),
                        current: Some(1_200),
                        previous: Some(1_000),
                    }],
                    shipping: ShippingSettings::default(),
                })
            });

        let mut res = TestClient::post("http://example.com/cart/validate")
            .json(&json!({
                "items": [{
                    "variantId": variant_id,
                    "productId": Uuid::now_v7(),
                    "title": "Blue Hour, A3",
                    "price": 1000,
                    "quantity": 1,
                    "slug": "blue-hour-a3"
                }],
                "knownShipping": { "standardRate": 500, "freeShippingThreshold": 5000 }
            }))
            .send(&make_service(cart_validation))
            .await;

        let body: ValidateCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.valid);
        assert_eq!(
            body.issues,
            vec![CartIssueBody {
                kind: "price_changed".to_string(),
                variant_id: Some(variant_id),
                message: "Price changed".to_string(),
                current: Some(1_200),
                previous: Some(1_000),
            }]
        );
        assert_eq!(body.shipping.standard_rate, 500);

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_rejects_malformed_body() -> TestResult {
        let mut cart_validation = MockCartValidationService::new();

        cart_validation.expect_validate_cart().never();

        let res = TestClient::post("http://example.com/cart/validate")
            .json(&json!({ "items": [{ "variantId": "nope" }] }))
            .send(&make_service(cart_validation))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
