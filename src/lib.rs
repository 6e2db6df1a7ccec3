//! Gallery
//!
//! Storefront core for the gallery shop: the client-side cart, cart validation
//! against live catalog data, order totals, order and inventory lifecycle rules,
//! and the payment provider event model.

pub mod cart;
pub mod checkout;
pub mod money;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod totals;
pub mod validation;
