//! Cart validation
//!
//! Loads authoritative variant data and shipping settings and diffs them
//! against a client's cart.

pub mod errors;
pub mod poller;
pub mod service;

pub use errors::CartValidationError;
pub use poller::ValidationPoller;
pub use service::*;
