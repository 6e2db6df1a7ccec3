//! Product variants
//!
//! The purchasable unit of the catalog: one size or edition of a work, with
//! its own price and stock.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::VariantsServiceError;
pub use service::*;
