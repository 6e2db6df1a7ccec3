//! Variant Records

use gallery::{orders::VariantStatus, validation::VariantSnapshot};
use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// Variant Record
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub slug: String,
    pub price: u64,
    pub stock: u32,
    pub status: VariantStatus,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VariantRecord {
    /// The fields cart validation compares against.
    #[must_use]
    pub fn snapshot(&self) -> VariantSnapshot {
        VariantSnapshot {
            id: self.uuid.into_uuid(),
            price: self.price,
            stock: self.stock,
            status: self.status,
        }
    }

    /// Whether `quantity` units can be sold right now.
    #[must_use]
    pub fn can_fulfil(&self, quantity: u32) -> bool {
        self.status == VariantStatus::Available && self.stock >= quantity
    }
}
