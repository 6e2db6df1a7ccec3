use clap::Args;
use gallery::{money::parse_amount, totals::ShippingSettings};
use gallery_app::domain::settings::{PgSettingsService, SettingsService};

#[derive(Debug, Args)]
pub(crate) struct SetShippingArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Flat shipping rate, e.g. `5.00`
    #[arg(long)]
    standard_rate: String,

    /// Subtotal from which shipping is free, e.g. `50.00`
    #[arg(long)]
    free_shipping_threshold: String,
}

pub(crate) async fn run(args: SetShippingArgs) -> Result<(), String> {
    let settings = ShippingSettings {
        standard_rate: parse_amount(&args.standard_rate)
            .map_err(|error| format!("invalid standard-rate: {error}"))?,
        free_shipping_threshold: parse_amount(&args.free_shipping_threshold)
            .map_err(|error| format!("invalid free-shipping-threshold: {error}"))?,
    };

    let db = super::super::connect(&args.database_url).await?;

    let stored = PgSettingsService::new(db)
        .update_shipping(settings)
        .await
        .map_err(|error| format!("failed to update shipping settings: {error}"))?;

    super::print_settings(&stored)
}
