//! Shop settings

pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use errors::SettingsServiceError;
pub use service::*;
