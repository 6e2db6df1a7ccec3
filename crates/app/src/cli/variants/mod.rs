use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct VariantsCommand {
    #[command(subcommand)]
    command: VariantsSubcommand,
}

#[derive(Debug, Subcommand)]
enum VariantsSubcommand {
    /// Print every variant with its price and stock
    List(list::ListVariantsArgs),
}

pub(crate) async fn run(command: VariantsCommand) -> Result<(), String> {
    match command.command {
        VariantsSubcommand::List(args) => list::run(args).await,
    }
}
