//! Depot lookups that fail as HTTP errors.

use std::any::{Any, type_name};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

pub(crate) trait DepotExt {
    /// Fetch a value injected by a hoop. A missing value is a wiring bug, so
    /// it is logged and reported as a 500.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!(value = type_name::<T>(), "depot value missing, is the state injected?");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_values_are_500s() {
        let depot = Depot::new();

        let error = depot.obtain_or_500::<String>().err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn injected_values_are_returned() {
        let mut depot = Depot::new();

        depot.inject(7_u32);

        assert_eq!(depot.obtain_or_500::<u32>().ok(), Some(&7));
    }
}
