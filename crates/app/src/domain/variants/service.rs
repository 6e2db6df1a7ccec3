//! Variants service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::{Db, with_retry},
    domain::variants::{
        data::{NewVariant, VariantUpdate},
        errors::VariantsServiceError,
        records::{VariantRecord, VariantUuid},
        repository::PgVariantsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgVariantsService {
    db: Db,
    repository: PgVariantsRepository,
}

impl PgVariantsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVariantsRepository::new(),
        }
    }

    async fn fetch_variants(
        &self,
        variants: &[VariantUuid],
    ) -> Result<Vec<VariantRecord>, sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        let records = self.repository.get_variants(&mut tx, variants).await?;

        tx.commit().await?;

        Ok(records)
    }
}

#[async_trait]
impl VariantsService for PgVariantsService {
    async fn list_variants(&self) -> Result<Vec<VariantRecord>, VariantsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let variants = self.repository.list_variants(&mut tx).await?;

        tx.commit().await?;

        Ok(variants)
    }

    async fn get_variant(
        &self,
        variant: VariantUuid,
    ) -> Result<VariantRecord, VariantsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let variant = self.repository.get_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn get_variants(
        &self,
        variants: Vec<VariantUuid>,
    ) -> Result<Vec<VariantRecord>, VariantsServiceError> {
        if variants.is_empty() {
            return Ok(Vec::new());
        }

        Ok(with_retry("get_variants", || self.fetch_variants(&variants)).await?)
    }

    async fn create_variant(
        &self,
        variant: NewVariant,
    ) -> Result<VariantRecord, VariantsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_variant(&mut tx, &variant).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_variant(
        &self,
        variant: VariantUuid,
        update: VariantUpdate,
    ) -> Result<VariantRecord, VariantsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_variant(&mut tx, variant, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait VariantsService: Send + Sync {
    /// Retrieves every variant in the catalog.
    async fn list_variants(&self) -> Result<Vec<VariantRecord>, VariantsServiceError>;

    /// Retrieve a single variant.
    async fn get_variant(&self, variant: VariantUuid)
    -> Result<VariantRecord, VariantsServiceError>;

    /// Retrieve the given variants; unknown ids are silently skipped.
    async fn get_variants(
        &self,
        variants: Vec<VariantUuid>,
    ) -> Result<Vec<VariantRecord>, VariantsServiceError>;

    /// Adds a variant to the catalog.
    async fn create_variant(
        &self,
        variant: NewVariant,
    ) -> Result<VariantRecord, VariantsServiceError>;

    /// Replaces a variant's price, stock and status.
    async fn update_variant(
        &self,
        variant: VariantUuid,
        update: VariantUpdate,
    ) -> Result<VariantRecord, VariantsServiceError>;
}
