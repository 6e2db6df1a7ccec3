//! PayPal errors

use gallery::money::AmountError;
use thiserror::Error;

/// Errors that can occur when communicating with PayPal.
#[derive(Debug, Error)]
pub enum PayPalError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// PayPal refused the request as unprocessable, e.g. a declined instrument.
    #[error("request rejected by PayPal: {0}")]
    Rejected(String),

    /// PayPal returned a non-2xx response or unexpected body.
    #[error("unexpected response from PayPal: {0}")]
    UnexpectedResponse(String),

    /// An amount could not be converted to or from PayPal's decimal format.
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),
}
