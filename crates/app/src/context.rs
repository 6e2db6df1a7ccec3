//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        cart_validation::{CartValidationService, DefaultCartValidationService},
        checkout::{CheckoutService, DefaultCheckoutService},
        orders::{OrdersService, PgOrdersService},
        settings::{PgSettingsService, SettingsService},
        variants::{PgVariantsService, VariantsService},
    },
    mailer::{LogMailer, Mailer},
    paypal::{PayPalClient, PayPalConfig, PayPalError, PaymentGateway},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build PayPal client")]
    PayPal(#[source] PayPalError),
}

#[derive(Clone)]
pub struct AppContext {
    pub variants: Arc<dyn VariantsService>,
    pub orders: Arc<dyn OrdersService>,
    pub settings: Arc<dyn SettingsService>,
    pub cart_validation: Arc<dyn CartValidationService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from a database URL and PayPal settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// PayPal client cannot be built.
    pub async fn from_database_url(url: &str, paypal: PayPalConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let gateway = PayPalClient::new(paypal).map_err(AppInitError::PayPal)?;

        Ok(Self::from_services(
            Arc::new(PgVariantsService::new(db.clone())),
            Arc::new(PgOrdersService::new(db.clone())),
            Arc::new(PgSettingsService::new(db)),
            Arc::new(gateway),
            Arc::new(LogMailer::new()),
        ))
    }

    /// Wire the composite services on top of the given building blocks.
    #[must_use]
    pub fn from_services(
        variants: Arc<dyn VariantsService>,
        orders: Arc<dyn OrdersService>,
        settings: Arc<dyn SettingsService>,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let cart_validation =
            DefaultCartValidationService::new(Arc::clone(&variants), Arc::clone(&settings));

        let checkout = DefaultCheckoutService::new(
            Arc::clone(&variants),
            Arc::clone(&orders),
            Arc::clone(&settings),
            gateway,
            mailer,
        );

        Self {
            variants,
            orders,
            settings,
            cart_validation: Arc::new(cart_validation),
            checkout: Arc::new(checkout),
        }
    }
}
