use clap::Args;
use gallery::{money::format_amount, orders::OrderStatus};
use gallery_app::domain::orders::{
    OrdersService, PgOrdersService,
    data::{DEFAULT_ORDER_LIMIT, OrderFilter},
};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Only show orders in this status, e.g. `PAID`
    #[arg(long)]
    status: Option<OrderStatus>,

    /// Maximum number of orders to show
    #[arg(long, default_value_t = DEFAULT_ORDER_LIMIT)]
    limit: u32,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;

    let orders = PgOrdersService::new(db)
        .list_orders(OrderFilter {
            status: args.status,
            limit: args.limit,
        })
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["uuid", "status", "customer", "total", "paypal order", "created"]);

    for order in orders {
        let total = format_amount(order.totals.total).map_err(|error| error.to_string())?;

        builder.push_record([
            order.uuid.to_string(),
            order.status.to_string(),
            order.customer.email,
            total,
            order.paypal_order_id,
            order.created_at.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    println!("{table}");

    Ok(())
}
