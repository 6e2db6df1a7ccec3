//! Orders Repository

use gallery::{
    checkout::{Customer, ShippingAddress},
    orders::OrderStatus,
    totals::OrderTotals,
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns,
    orders::{
        data::{NewOrder, OrderFilter},
        records::{OrderRecord, OrderUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const GET_ORDER_BY_PAYPAL_ID_SQL: &str = include_str!("../sql/get_order_by_paypal_id.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const MARK_ORDER_PAID_SQL: &str = include_str!("../sql/mark_order_paid.sql");
const CANCEL_PENDING_ORDER_SQL: &str = include_str!("../sql/cancel_pending_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let totals = &order.totals;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&order.customer.name)
            .bind(&order.customer.email)
            .bind(order.customer.phone.as_deref())
            .bind(&order.shipping_address.line1)
            .bind(order.shipping_address.line2.as_deref())
            .bind(&order.shipping_address.city)
            .bind(&order.shipping_address.postal_code)
            .bind(&order.shipping_address.country)
            .bind(columns::bind_amount(totals.subtotal, "subtotal")?)
            .bind(columns::bind_amount(totals.tax, "tax")?)
            .bind(columns::bind_amount(totals.shipping, "shipping")?)
            .bind(columns::bind_amount(totals.total, "total")?)
            .bind(&order.paypal_order_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_by_paypal_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        paypal_order_id: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_BY_PAYPAL_ID_SQL)
            .bind(paypal_order_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Read an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(i64::from(filter.limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Move a `PENDING` order to `PAID`. Returns `None` when no pending order
    /// matched, in which case nothing was written.
    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        paypal_order_id: &str,
        capture_id: &str,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(MARK_ORDER_PAID_SQL)
            .bind(paypal_order_id)
            .bind(capture_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Move a `PENDING` order to `CANCELLED`. Returns `None` when no pending
    /// order matched.
    pub(crate) async fn cancel_pending(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        paypal_order_id: &str,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CANCEL_PENDING_ORDER_SQL)
            .bind(paypal_order_id)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            status: columns::parsed(row, "status")?,
            customer: Customer {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            shipping_address: ShippingAddress {
                line1: row.try_get("address_line1")?,
                line2: row.try_get("address_line2")?,
                city: row.try_get("city")?,
                postal_code: row.try_get("postal_code")?,
                country: row.try_get("country")?,
            },
            totals: OrderTotals {
                subtotal: columns::amount(row, "subtotal")?,
                tax: columns::amount(row, "tax")?,
                shipping: columns::amount(row, "shipping")?,
                total: columns::amount(row, "total")?,
            },
            paypal_order_id: row.try_get("paypal_order_id")?,
            paypal_capture_id: row.try_get("paypal_capture_id")?,
            items: Vec::new(),
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
