//! Order and inventory lifecycle rules.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Raised when a status string is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status {0:?}")]
pub struct UnknownStatus(pub String);

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created at checkout, awaiting payment.
    Pending,
    /// Payment captured.
    Paid,
    /// Being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
    /// Payment returned to the customer.
    Refunded,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Paid,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Refunded,
    ];

    /// Database and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Refunded => "REFUNDED",
        }
    }

    /// Terminal orders can no longer change.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Refunded)
    }

    /// Whether payment has been captured for an order in this status.
    pub const fn is_paid(self) -> bool {
        matches!(
            self,
            Self::Paid | Self::Processing | Self::Shipped | Self::Delivered | Self::Refunded
        )
    }

    /// Whether an order may move from `self` to `next`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        match self {
            Self::Pending => matches!(next, Self::Paid | Self::Cancelled),
            Self::Paid => matches!(
                next,
                Self::Processing | Self::Shipped | Self::Cancelled | Self::Refunded
            ),
            Self::Processing => matches!(next, Self::Shipped | Self::Cancelled | Self::Refunded),
            Self::Shipped => matches!(next, Self::Delivered | Self::Refunded),
            Self::Delivered | Self::Cancelled | Self::Refunded => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Variant availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantStatus {
    /// Can be bought.
    Available,
    /// Stock ran out.
    OutOfStock,
    /// Withdrawn from sale.
    Discontinued,
}

impl VariantStatus {
    /// Database and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::Discontinued => "DISCONTINUED",
        }
    }
}

impl fmt::Display for VariantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Available, Self::OutOfStock, Self::Discontinued]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Outcome of taking units out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    /// Remaining stock, never below zero.
    pub stock: u32,
    /// Status after the adjustment.
    pub status: VariantStatus,
}

impl StockAdjustment {
    /// Remove `quantity` units from `stock`.
    ///
    /// Stock saturates at zero and flips the variant to
    /// [`VariantStatus::OutOfStock`]; a discontinued variant stays discontinued.
    pub fn apply(stock: u32, status: VariantStatus, quantity: u32) -> Self {
        let stock = stock.saturating_sub(quantity);

        let status = match status {
            VariantStatus::Discontinued => VariantStatus::Discontinued,
            _ if stock == 0 => VariantStatus::OutOfStock,
            other => other,
        };

        Self { stock, status }
    }
}

/// A priced order line, snapshotting the variant price at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Ordered variant.
    pub variant_id: Uuid,
    /// Variant title at order time.
    pub title: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price in minor units.
    pub price: u64,
    /// `price * quantity` in minor units.
    pub total: u64,
}

impl OrderLine {
    /// Build a line from a unit price and quantity.
    pub fn new(variant_id: Uuid, title: impl Into<String>, price: u64, quantity: u32) -> Self {
        Self {
            variant_id,
            title: title.into(),
            quantity,
            price,
            total: price.saturating_mul(u64::from(quantity)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn pending_only_moves_to_paid_or_cancelled() {
        let allowed: Vec<OrderStatus> = OrderStatus::ALL
            .into_iter()
            .filter(|next| OrderStatus::Pending.can_transition_to(*next))
            .collect();

        assert_eq!(allowed, vec![OrderStatus::Paid, OrderStatus::Cancelled]);
    }

    #[test]
    fn terminal_statuses_accept_nothing() {
        for status in OrderStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            assert!(
                OrderStatus::ALL
                    .into_iter()
                    .all(|next| !status.can_transition_to(next)),
                "{status} should be immutable"
            );
        }
    }

    #[test]
    fn status_strings_round_trip() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert_eq!("paid".parse::<OrderStatus>()?, OrderStatus::Paid);
        assert!("LOST".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn status_serializes_screaming_case() -> TestResult {
        assert_eq!(
            serde_json::to_string(&VariantStatus::OutOfStock)?,
            "\"OUT_OF_STOCK\""
        );

        Ok(())
    }

    #[test]
    fn stock_adjustment_marks_out_of_stock_at_zero() {
        let adjusted = StockAdjustment::apply(2, VariantStatus::Available, 2);

        assert_eq!(adjusted.stock, 0);
        assert_eq!(adjusted.status, VariantStatus::OutOfStock);
    }

    #[test]
    fn stock_adjustment_saturates() {
        let adjusted = StockAdjustment::apply(1, VariantStatus::Available, 3);

        assert_eq!(adjusted.stock, 0);
    }

    #[test]
    fn stock_adjustment_keeps_discontinued() {
        let adjusted = StockAdjustment::apply(1, VariantStatus::Discontinued, 1);

        assert_eq!(adjusted.status, VariantStatus::Discontinued);
    }

    #[test]
    fn order_line_total_is_price_times_quantity() {
        let line = OrderLine::new(Uuid::nil(), "Print", 1_250, 3);

        assert_eq!(line.total, 3_750);
    }
}
