//! Variants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    columns,
    variants::{
        data::{NewVariant, VariantUpdate},
        records::{VariantRecord, VariantUuid},
    },
};

const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const GET_VARIANTS_SQL: &str = include_str!("sql/get_variants.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const UPDATE_VARIANT_SQL: &str = include_str!("sql/update_variant.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVariantsRepository;

impl PgVariantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<VariantRecord>, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(LIST_VARIANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(GET_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variants: &[VariantUuid],
    ) -> Result<Vec<VariantRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = variants.iter().copied().map(VariantUuid::into_uuid).collect();

        query_as::<Postgres, VariantRecord>(GET_VARIANTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: &NewVariant,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.product_uuid)
            .bind(&variant.title)
            .bind(&variant.slug)
            .bind(columns::bind_amount(variant.price, "price")?)
            .bind(columns::bind_count(variant.stock, "stock")?)
            .bind(variant.status.as_str())
            .bind(variant.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        update: &VariantUpdate,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(UPDATE_VARIANT_SQL)
            .bind(variant.into_uuid())
            .bind(columns::bind_amount(update.price, "price")?)
            .bind(columns::bind_count(update.stock, "stock")?)
            .bind(update.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Take `quantity` units out of stock, saturating at zero.
    ///
    /// Reaching zero marks the variant out of stock unless it is discontinued.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(variant.into_uuid())
            .bind(columns::bind_count(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: row.try_get("product_uuid")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            price: columns::amount(row, "price")?,
            stock: columns::count(row, "stock")?,
            status: columns::parsed(row, "status")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
