use clap::{Parser, Subcommand};
use gallery_app::database::{self, Db};

mod orders;
mod seed;
mod shipping;
mod variants;

#[derive(Debug, Parser)]
#[command(name = "gallery-app", about = "Gallery shop CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or update variants (and optionally shipping) from a YAML file
    Seed(seed::SeedArgs),
    Variants(variants::VariantsCommand),
    Shipping(shipping::ShippingCommand),
    Orders(orders::OrdersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Seed(args) => seed::run(args).await,
            Commands::Variants(command) => variants::run(command).await,
            Commands::Shipping(command) => shipping::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
