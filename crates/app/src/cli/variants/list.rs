use clap::Args;
use gallery::money::format_amount;
use gallery_app::domain::variants::{PgVariantsService, VariantsService};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Args)]
pub(crate) struct ListVariantsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListVariantsArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;

    let variants = PgVariantsService::new(db)
        .list_variants()
        .await
        .map_err(|error| format!("failed to list variants: {error}"))?;

    if variants.is_empty() {
        println!("no variants found");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["uuid", "title", "slug", "price", "stock", "status"]);

    for variant in variants {
        let price = format_amount(variant.price).map_err(|error| error.to_string())?;

        builder.push_record([
            variant.uuid.to_string(),
            variant.title,
            variant.slug,
            price,
            variant.stock.to_string(),
            variant.status.as_str().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    println!("{table}");

    Ok(())
}
