//! Cart validation service.

use std::sync::Arc;

use async_trait::async_trait;
use gallery::{
    cart::CartItem,
    totals::ShippingSettings,
    validation::{CartValidation, VariantSnapshot, validate_cart},
};
use mockall::automock;
use serde::Deserialize;

use crate::domain::{
    cart_validation::errors::CartValidationError,
    settings::SettingsService,
    variants::{VariantsService, records::VariantUuid},
};

/// A cart to check, plus the shipping settings the client last saw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartValidationRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub known_shipping: Option<ShippingSettings>,
}

#[derive(Clone)]
pub struct DefaultCartValidationService {
    variants: Arc<dyn VariantsService>,
    settings: Arc<dyn SettingsService>,
}

impl DefaultCartValidationService {
    #[must_use]
    pub fn new(variants: Arc<dyn VariantsService>, settings: Arc<dyn SettingsService>) -> Self {
        Self { variants, settings }
    }
}

#[async_trait]
impl CartValidationService for DefaultCartValidationService {
    async fn validate_cart(
        &self,
        request: CartValidationRequest,
    ) -> Result<CartValidation, CartValidationError> {
        let ids = request
            .items
            .iter()
            .map(|item| VariantUuid::from_uuid(item.variant_id))
            .collect();

        let variants: Vec<VariantSnapshot> = self
            .variants
            .get_variants(ids)
            .await?
            .iter()
            .map(|variant| variant.snapshot())
            .collect();

        let shipping = self.settings.get_shipping().await?;

        Ok(validate_cart(
            &request.items,
            &variants,
            shipping,
            request.known_shipping,
        ))
    }
}

#[automock]
#[async_trait]
pub trait CartValidationService: Send + Sync {
    /// Compare a cart against live catalog data. Nothing is modified.
    async fn validate_cart(
        &self,
        request: CartValidationRequest,
    ) -> Result<CartValidation, CartValidationError>;
}
