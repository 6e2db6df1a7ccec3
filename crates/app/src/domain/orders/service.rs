//! Orders service.

use async_trait::async_trait;
use gallery::orders::OrderStatus;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, OrderFilter},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderUuid, StatusChange},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        variants::repository::PgVariantsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    variants: PgVariantsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            variants: PgVariantsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        order.items = self.items.get_items(tx, &[order.uuid]).await?;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut created = self.orders.create_order(&mut tx, &order).await?;

        for line in &order.items {
            let item = self.items.create_item(&mut tx, created.uuid, line).await?;

            created.items.push(item);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders.get_order(&mut tx, order).await?;
        let order = self.with_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn get_order_by_paypal_id(
        &self,
        paypal_order_id: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders
            .get_order_by_paypal_id(&mut tx, &paypal_order_id)
            .await?;
        let order = self.with_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders.list_orders(&mut tx, filter).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in self.items.get_items(&mut tx, &uuids).await? {
            items.entry(item.order_uuid).or_default().push(item);
        }

        tx.commit().await?;

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders.lock_order(&mut tx, order).await?;

        let updated = if current.status == status {
            current
        } else if status == OrderStatus::Paid || !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        } else {
            self.orders.update_status(&mut tx, order, status).await?
        };

        let updated = self.with_items(&mut tx, updated).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn mark_paid(
        &self,
        paypal_order_id: String,
        capture_id: String,
    ) -> Result<StatusChange, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let paid = self
            .orders
            .mark_paid(&mut tx, &paypal_order_id, &capture_id)
            .await?;

        let change = match paid {
            Some(order) => {
                let order = self.with_items(&mut tx, order).await?;

                for item in &order.items {
                    self.variants
                        .decrement_stock(&mut tx, item.variant_uuid, item.quantity)
                        .await?;
                }

                info!(
                    order_uuid = %order.uuid,
                    paypal_order_id = %order.paypal_order_id,
                    items = order.items.len(),
                    "order paid, stock decremented"
                );

                StatusChange {
                    order,
                    changed: true,
                }
            }
            None => {
                let order = self
                    .orders
                    .get_order_by_paypal_id(&mut tx, &paypal_order_id)
                    .await?;

                StatusChange {
                    order: self.with_items(&mut tx, order).await?,
                    changed: false,
                }
            }
        };

        tx.commit().await?;

        Ok(change)
    }

    async fn cancel_pending(
        &self,
        paypal_order_id: String,
    ) -> Result<StatusChange, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let change = match self.orders.cancel_pending(&mut tx, &paypal_order_id).await? {
            Some(order) => StatusChange {
                order: self.with_items(&mut tx, order).await?,
                changed: true,
            },
            None => {
                let order = self
                    .orders
                    .get_order_by_paypal_id(&mut tx, &paypal_order_id)
                    .await?;

                StatusChange {
                    order: self.with_items(&mut tx, order).await?,
                    changed: false,
                }
            }
        };

        tx.commit().await?;

        Ok(change)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist a new `PENDING` order together with its items.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order by its local id.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order by the payment provider's order id.
    async fn get_order_by_paypal_id(
        &self,
        paypal_order_id: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// List orders, newest first.
    async fn list_orders(&self, filter: OrderFilter)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Administrative status change, checked against the lifecycle rules.
    ///
    /// Setting the current status again is a no-op. `PAID` can only be
    /// reached through [`OrdersService::mark_paid`].
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Record a completed capture.
    ///
    /// Moves the order from `PENDING` to `PAID` and takes its items out of
    /// stock in one transaction. Calling it again, or concurrently, for the
    /// same order changes nothing and reports `changed: false`.
    async fn mark_paid(
        &self,
        paypal_order_id: String,
        capture_id: String,
    ) -> Result<StatusChange, OrdersServiceError>;

    /// Cancel an order whose payment was denied, if it is still `PENDING`.
    async fn cancel_pending(
        &self,
        paypal_order_id: String,
    ) -> Result<StatusChange, OrdersServiceError>;
}
