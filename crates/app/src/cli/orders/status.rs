use clap::Args;
use gallery::orders::OrderStatus;
use gallery_app::domain::orders::{OrdersService, PgOrdersService, records::OrderUuid};

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID
    order_uuid: OrderUuid,

    /// New status, e.g. `SHIPPED`
    status: OrderStatus,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;

    let order = PgOrdersService::new(db)
        .update_status(args.order_uuid, args.status)
        .await
        .map_err(|error| format!("failed to update order {}: {error}", args.order_uuid))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);

    Ok(())
}
