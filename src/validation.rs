//! Cart validation
//!
//! Diffs the client's cart against authoritative variant data and shipping
//! settings. Nothing is mutated; callers decide how to resolve each issue.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{cart::CartItem, orders::VariantStatus, totals::ShippingSettings};

/// Authoritative state of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSnapshot {
    /// Variant id.
    pub id: Uuid,
    /// Current unit price in minor units.
    pub price: u64,
    /// Units in stock.
    pub stock: u32,
    /// Current availability.
    pub status: VariantStatus,
}

/// Issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartIssueKind {
    /// Nothing left in stock.
    StockUnavailable,
    /// Less stock than the cart asks for.
    StockReduced,
    /// Unit price differs from the cart.
    PriceChanged,
    /// Variant gone or withdrawn from sale.
    ProductUnavailable,
    /// Shipping settings differ from what the client last saw.
    ShippingChanged,
}

/// A single difference between the cart and authoritative data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartIssue {
    /// Issue category.
    pub kind: CartIssueKind,
    /// Affected line, absent for cart-wide issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<Uuid>,
    /// Human readable description.
    pub message: String,
    /// Authoritative value (stock or price), where relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    /// Value the cart holds, where relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<u64>,
}

/// Result of validating a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartValidation {
    /// `true` when there are no issues.
    pub valid: bool,
    /// Every issue found.
    pub issues: Vec<CartIssue>,
    /// Current shipping settings.
    pub shipping: ShippingSettings,
}

impl CartValidation {
    /// Issues concerning a given line.
    pub fn issues_for(&self, variant_id: Uuid) -> impl Iterator<Item = &CartIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.variant_id == Some(variant_id))
    }
}

/// Compare a cart against authoritative variants and shipping settings.
///
/// `known_shipping` is the copy of the settings the client last saw; when it is
/// `None` shipping is not compared.
pub fn validate_cart(
    items: &[CartItem],
    variants: &[VariantSnapshot],
    shipping: ShippingSettings,
    known_shipping: Option<ShippingSettings>,
) -> CartValidation {
    let by_id: FxHashMap<Uuid, &VariantSnapshot> =
        variants.iter().map(|variant| (variant.id, variant)).collect();

    let mut issues: Vec<CartIssue> = items
        .iter()
        .flat_map(|item| line_issues(item, by_id.get(&item.variant_id).copied()))
        .collect();

    if let Some(known) = known_shipping
        && known != shipping
    {
        issues.push(CartIssue {
            kind: CartIssueKind::ShippingChanged,
            variant_id: None,
            message: "Shipping costs have changed".to_string(),
            current: Some(shipping.standard_rate),
            previous: Some(known.standard_rate),
        });
    }

    CartValidation {
        valid: issues.is_empty(),
        issues,
        shipping,
    }
}

fn line_issues(item: &CartItem, variant: Option<&VariantSnapshot>) -> Vec<CartIssue> {
    let Some(variant) = variant.filter(|v| v.status != VariantStatus::Discontinued) else {
        return vec![CartIssue {
            kind: CartIssueKind::ProductUnavailable,
            variant_id: Some(item.variant_id),
            message: format!("{} is no longer available", item.title),
            current: None,
            previous: None,
        }];
    };

    let mut issues = Vec::new();

    if variant.stock == 0 || variant.status == VariantStatus::OutOfStock {
        issues.push(CartIssue {
            kind: CartIssueKind::StockUnavailable,
            variant_id: Some(item.variant_id),
            message: format!("{} is out of stock", item.title),
            current: Some(0),
            previous: Some(u64::from(item.quantity)),
        });
    } else if variant.stock < item.quantity {
        issues.push(CartIssue {
            kind: CartIssueKind::StockReduced,
            variant_id: Some(item.variant_id),
            message: format!("Only {} of {} left in stock", variant.stock, item.title),
            current: Some(u64::from(variant.stock)),
            previous: Some(u64::from(item.quantity)),
        });
    }

    if variant.price != item.price {
        issues.push(CartIssue {
            kind: CartIssueKind::PriceChanged,
            variant_id: Some(item.variant_id),
            message: format!("The price of {} has changed", item.title),
            current: Some(variant.price),
            previous: Some(item.price),
        });
    }

    issues
}
