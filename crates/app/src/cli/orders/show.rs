use clap::Args;
use gallery::money::format_amount;
use gallery_app::domain::orders::{OrdersService, PgOrdersService, records::OrderUuid};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Order UUID
    order_uuid: OrderUuid,
}

fn amount(value: u64) -> Result<String, String> {
    format_amount(value).map_err(|error| error.to_string())
}

pub(crate) async fn run(args: ShowOrderArgs) -> Result<(), String> {
    let db = super::super::connect(&args.database_url).await?;

    let order = PgOrdersService::new(db)
        .get_order(args.order_uuid)
        .await
        .map_err(|error| format!("failed to load order {}: {error}", args.order_uuid))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);
    println!("customer: {} <{}>", order.customer.name, order.customer.email);
    println!("paypal_order_id: {}", order.paypal_order_id);
    if let Some(capture_id) = &order.paypal_capture_id {
        println!("paypal_capture_id: {capture_id}");
    }
    if let Some(paid_at) = order.paid_at {
        println!("paid_at: {paid_at}");
    }

    let mut builder = Builder::default();
    builder.push_record(["item", "qty", "price", "total"]);

    for item in &order.items {
        builder.push_record([
            item.title.clone(),
            item.quantity.to_string(),
            amount(item.price)?,
            amount(item.total)?,
        ]);
    }

    for (label, value) in [
        ("Subtotal", order.totals.subtotal),
        ("Tax", order.totals.tax),
        ("Shipping", order.totals.shipping),
        ("Total", order.totals.total),
    ] {
        builder.push_record([label.to_string(), String::new(), String::new(), amount(value)?]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());

    println!("{table}");

    Ok(())
}
