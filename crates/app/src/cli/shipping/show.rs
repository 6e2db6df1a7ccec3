use clap::Args;
use gallery_app::domain::settings::{PgSettingsService, SettingsService};

#[derive(Debug, Args)]
pub(crate) struct ShowShippingArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ShowShippingArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;

    let settings = PgSettingsService::new(db)
        .get_shipping()
        .await
        .map_err(|error| format!("failed to load shipping settings: {error}"))?;

    super::print_settings(&settings)
}
