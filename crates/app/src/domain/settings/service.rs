//! Settings service.

use async_trait::async_trait;
use gallery::totals::ShippingSettings;
use mockall::automock;

use crate::{
    database::{Db, with_retry},
    domain::settings::{errors::SettingsServiceError, repository::PgSettingsRepository},
};

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
}

impl PgSettingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSettingsRepository::new(),
        }
    }

    async fn fetch_shipping(&self) -> Result<Option<ShippingSettings>, sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        let settings = self.repository.get_shipping(&mut tx).await?;

        tx.commit().await?;

        Ok(settings)
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    async fn get_shipping(&self) -> Result<ShippingSettings, SettingsServiceError> {
        let settings = with_retry("get_shipping", || self.fetch_shipping()).await?;

        Ok(settings.unwrap_or_default())
    }

    async fn update_shipping(
        &self,
        settings: ShippingSettings,
    ) -> Result<ShippingSettings, SettingsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.upsert_shipping(&mut tx, settings).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Current shipping settings, falling back to the defaults when none
    /// have been stored.
    async fn get_shipping(&self) -> Result<ShippingSettings, SettingsServiceError>;

    /// Store new shipping settings.
    async fn update_shipping(
        &self,
        settings: ShippingSettings,
    ) -> Result<ShippingSettings, SettingsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn defaults_apply_until_settings_are_stored() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.settings.get_shipping().await?, ShippingSettings::default());

        Ok(())
    }

    #[tokio::test]
    async fn update_shipping_replaces_stored_settings() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ShippingSettings {
            standard_rate: 700,
            free_shipping_threshold: 10_000,
        };
        let second = ShippingSettings {
            standard_rate: 0,
            free_shipping_threshold: 0,
        };

        assert_eq!(ctx.settings.update_shipping(first).await?, first);
        assert_eq!(ctx.settings.update_shipping(second).await?, second);
        assert_eq!(ctx.settings.get_shipping().await?, second);

        Ok(())
    }
}
