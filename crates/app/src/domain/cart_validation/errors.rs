//! Cart validation errors.

use thiserror::Error;

use crate::domain::{settings::SettingsServiceError, variants::VariantsServiceError};

#[derive(Debug, Error)]
pub enum CartValidationError {
    #[error("failed to load variants")]
    Variants(#[from] VariantsServiceError),

    #[error("failed to load shipping settings")]
    Settings(#[from] SettingsServiceError),
}
