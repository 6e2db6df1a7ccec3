//! Admin Config

use clap::Args;

/// Admin API settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Bearer token for the `/admin` routes; admin routes reject every
    /// request when unset
    #[arg(long, env = "ADMIN_API_TOKEN", hide_env_values = true)]
    pub admin_api_token: Option<String>,
}
