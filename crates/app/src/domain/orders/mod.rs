//! Orders
//!
//! Orders are created `PENDING` at checkout and only ever reach `PAID`
//! through [`OrdersService::mark_paid`], which also takes the ordered units
//! out of stock.

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
