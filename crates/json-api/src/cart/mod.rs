//! Cart

pub(crate) mod errors;
pub(crate) mod validate;
