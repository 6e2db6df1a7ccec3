use clap::{Args, Subcommand};
use gallery::{money::format_amount, totals::ShippingSettings};

mod set;
mod show;

#[derive(Debug, Args)]
pub(crate) struct ShippingCommand {
    #[command(subcommand)]
    command: ShippingSubcommand,
}

#[derive(Debug, Subcommand)]
enum ShippingSubcommand {
    /// Print the shipping settings checkout uses
    Show(show::ShowShippingArgs),
    /// Replace the shipping settings
    Set(set::SetShippingArgs),
}

pub(crate) async fn run(command: ShippingCommand) -> Result<(), String> {
    match command.command {
        ShippingSubcommand::Show(args) => show::run(args).await,
        ShippingSubcommand::Set(args) => set::run(args).await,
    }
}

fn print_settings(settings: &ShippingSettings) -> Result<(), String> {
    let rate = format_amount(settings.standard_rate).map_err(|error| error.to_string())?;
    let threshold =
        format_amount(settings.free_shipping_threshold).map_err(|error| error.to_string())?;

    println!("standard_rate: {rate}");
    println!("free_shipping_threshold: {threshold}");

    Ok(())
}
