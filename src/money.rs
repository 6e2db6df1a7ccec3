//! Money
//!
//! Amounts are carried as integer minor units (cents) of the store currency and
//! only turned into [`Money`] values at the edges, e.g. when talking to the
//! payment provider.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use thiserror::Error;

/// The currency every price in the store is denominated in.
pub const CURRENCY: &iso::Currency = iso::EUR;

/// Errors raised while converting between minor units and decimal amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount does not fit the numeric range used by the money type.
    #[error("amount {0} is out of range")]
    OutOfRange(String),

    /// The decimal string could not be parsed.
    #[error("invalid amount {0:?}")]
    Invalid(String),

    /// The decimal string has more precision than the currency allows.
    #[error("amount {0:?} has more than two decimal places")]
    TooPrecise(String),
}

/// Wrap an amount of minor units as [`Money`] in the store currency.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] when the amount does not fit an `i64`.
pub fn to_money(minor: u64) -> Result<Money<'static, iso::Currency>, AmountError> {
    let minor = i64::try_from(minor).map_err(|_overflow| AmountError::OutOfRange(minor.to_string()))?;

    Ok(Money::from_minor(minor, CURRENCY))
}

/// Format an amount of minor units as a two decimal string (`2920` -> `"29.20"`).
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] when the amount does not fit an `i64`.
pub fn format_amount(minor: u64) -> Result<String, AmountError> {
    let money = to_money(minor)?;

    Ok(format!("{:.2}", money.amount()))
}

/// Parse a decimal string such as `"29.20"` into minor units.
///
/// # Errors
///
/// Returns an error for malformed, negative or over-precise values.
pub fn parse_amount(value: &str) -> Result<u64, AmountError> {
    let amount = Decimal::from_str(value.trim()).map_err(|_parse| AmountError::Invalid(value.to_string()))?;

    if amount.is_sign_negative() {
        return Err(AmountError::Invalid(value.to_string()));
    }

    let minor = amount * Decimal::ONE_HUNDRED;

    if minor.fract() != Decimal::ZERO {
        return Err(AmountError::TooPrecise(value.to_string()));
    }

    minor
        .to_u64()
        .ok_or_else(|| AmountError::OutOfRange(value.to_string()))
}
