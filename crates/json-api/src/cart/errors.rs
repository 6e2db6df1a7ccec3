//! Errors

use salvo::http::StatusError;
use tracing::error;

use gallery_app::domain::cart_validation::CartValidationError;

pub(crate) fn into_status_error(error: CartValidationError) -> StatusError {
    match error {
        CartValidationError::Variants(source) => {
            error!("failed to load variants for cart validation: {source}");
        }
        CartValidationError::Settings(source) => {
            error!("failed to load shipping settings for cart validation: {source}");
        }
    }

    StatusError::internal_server_error()
}
