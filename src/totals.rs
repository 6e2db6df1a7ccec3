//! Order totals

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::orders::OrderLine;

/// Default flat shipping rate in minor units.
pub const DEFAULT_STANDARD_RATE: u64 = 500;

/// Default subtotal from which shipping is free, in minor units.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: u64 = 5_000;

/// Sales tax applied to the subtotal (21%).
pub const TAX_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Store shipping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingSettings {
    /// Flat rate charged per order.
    pub standard_rate: u64,
    /// Subtotal from which shipping is free.
    pub free_shipping_threshold: u64,
}

impl Default for ShippingSettings {
    fn default() -> Self {
        Self {
            standard_rate: DEFAULT_STANDARD_RATE,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
        }
    }
}

impl ShippingSettings {
    /// Shipping charged for a given subtotal.
    pub fn shipping_for(&self, subtotal: u64) -> u64 {
        if self.standard_rate > 0 && subtotal >= self.free_shipping_threshold {
            0
        } else {
            self.standard_rate
        }
    }

    /// Totals for `items` under these settings.
    pub fn totals_for(&self, items: &[OrderLine]) -> OrderTotals {
        calculate_order_total(items, self.standard_rate, self.free_shipping_threshold)
    }
}

/// Breakdown of an order's amounts, all in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: u64,
    /// Tax on the subtotal.
    pub tax: u64,
    /// Shipping charge.
    pub shipping: u64,
    /// `subtotal + tax + shipping`.
    pub total: u64,
}

/// Calculate subtotal, tax, shipping and total for a set of order lines.
pub fn calculate_order_total(
    items: &[OrderLine],
    standard_rate: u64,
    free_shipping_threshold: u64,
) -> OrderTotals {
    let subtotal = items
        .iter()
        .fold(0_u64, |acc, item| acc.saturating_add(item.total));

    let tax = tax_for(subtotal);

    let shipping = ShippingSettings {
        standard_rate,
        free_shipping_threshold,
    }
    .shipping_for(subtotal);

    OrderTotals {
        subtotal,
        tax,
        shipping,
        total: subtotal.saturating_add(tax).saturating_add(shipping),
    }
}

/// Tax on `subtotal`, rounded half away from zero to whole minor units.
pub fn tax_for(subtotal: u64) -> u64 {
    (Decimal::from(subtotal) * TAX_RATE)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}
