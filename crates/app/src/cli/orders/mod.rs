use clap::{Args, Subcommand};

mod list;
mod show;
mod status;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, newest first
    List(list::ListOrdersArgs),
    /// Print one order with its items
    Show(show::ShowOrderArgs),
    /// Move an order to a new fulfilment status
    Status(status::SetStatusArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(args).await,
        OrdersSubcommand::Show(args) => show::run(args).await,
        OrdersSubcommand::Status(args) => status::run(args).await,
    }
}
