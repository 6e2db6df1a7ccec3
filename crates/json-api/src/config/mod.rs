//! Server configuration module

use clap::Parser;

use crate::config::{
    admin::AdminConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    paypal::PayPalSettings,
    server::ServerRuntimeConfig,
};

pub(crate) mod admin;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod paypal;
pub(crate) mod server;

/// Gallery JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "gallery-json", about = "Gallery JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// PayPal REST credentials and storefront URLs.
    #[command(flatten)]
    pub paypal: PayPalSettings,

    /// Admin API settings.
    #[command(flatten)]
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;
    use crate::config::observability::LogFormat;

    const REQUIRED: [&str; 7] = [
        "gallery-json",
        "--database-url",
        "postgres://localhost/gallery",
        "--paypal-client-id",
        "client",
        "--paypal-client-secret",
        "secret",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_set() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.paypal.paypal_api_base, "https://api-m.sandbox.paypal.com");
        assert!(config.admin.admin_api_token.is_none());
        assert!(!config.observability.otel_enabled);
        assert_eq!(config.logging.log_format, LogFormat::Compact);

        let paypal = config.paypal.into_client_config();

        assert_eq!(paypal.timeout, Duration::from_secs(15));
        assert!(paypal.webhook_id.is_none());

        Ok(())
    }

    #[test]
    fn paypal_credentials_are_required() {
        let result = ServerConfig::try_parse_from(["gallery-json", "--database-url", "postgres://x"]);

        assert!(result.is_err(), "missing PayPal credentials should fail");
    }
}
