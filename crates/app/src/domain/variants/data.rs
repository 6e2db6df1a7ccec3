//! Variants Data

use gallery::orders::VariantStatus;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::variants::records::VariantUuid;

/// New Variant Data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub slug: String,
    pub price: u64,
    pub stock: u32,
    #[serde(default = "available")]
    pub status: VariantStatus,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Variant Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct VariantUpdate {
    pub price: u64,
    pub stock: u32,
    pub status: VariantStatus,
}

impl From<&NewVariant> for VariantUpdate {
    fn from(variant: &NewVariant) -> Self {
        Self {
            price: variant.price,
            stock: variant.stock,
            status: variant.status,
        }
    }
}

fn available() -> VariantStatus {
    VariantStatus::Available
}
