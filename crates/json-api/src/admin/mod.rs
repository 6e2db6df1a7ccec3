//! Admin API
//!
//! Order management for shop staff, guarded by a static bearer token.

pub(crate) mod middleware;
pub(crate) mod orders;
