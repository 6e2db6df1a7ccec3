//! Settings Repository

use gallery::totals::ShippingSettings;
use sqlx::{Postgres, Transaction, postgres::PgRow, query};

use crate::domain::columns;

const GET_SHIPPING_SETTINGS_SQL: &str = include_str!("sql/get_shipping_settings.sql");
const UPSERT_SHIPPING_SETTINGS_SQL: &str = include_str!("sql/upsert_shipping_settings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_shipping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<ShippingSettings>, sqlx::Error> {
        query(GET_SHIPPING_SETTINGS_SQL)
            .fetch_optional(&mut **tx)
            .await?
            .as_ref()
            .map(shipping_from_row)
            .transpose()
    }

    pub(crate) async fn upsert_shipping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        settings: ShippingSettings,
    ) -> Result<ShippingSettings, sqlx::Error> {
        let row = query(UPSERT_SHIPPING_SETTINGS_SQL)
            .bind(columns::bind_amount(settings.standard_rate, "standard_shipping_rate")?)
            .bind(columns::bind_amount(
                settings.free_shipping_threshold,
                "free_shipping_threshold",
            )?)
            .fetch_one(&mut **tx)
            .await?;

        shipping_from_row(&row)
    }
}

fn shipping_from_row(row: &PgRow) -> sqlx::Result<ShippingSettings> {
    Ok(ShippingSettings {
        standard_rate: columns::amount(row, "standard_shipping_rate")?,
        free_shipping_threshold: columns::amount(row, "free_shipping_threshold")?,
    })
}
