//! Order notifications
//!
//! Templating and delivery live outside this service; [`LogMailer`] records
//! each notification through `tracing` so they can be picked up downstream.

use async_trait::async_trait;
use gallery::money::format_amount;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::domain::orders::records::OrderRecord;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("failed to send {kind} for order {order}: {reason}")]
    Delivery {
        kind: &'static str,
        order: String,
        reason: String,
    },
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Tell the customer their payment went through.
    async fn send_order_confirmation(&self, order: &OrderRecord) -> Result<(), MailerError>;

    /// Tell the shop a new paid order is waiting.
    async fn send_admin_notification(&self, order: &OrderRecord) -> Result<(), MailerError>;
}

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn display_total(order: &OrderRecord) -> String {
    format_amount(order.totals.total).unwrap_or_else(|_| order.totals.total.to_string())
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_order_confirmation(&self, order: &OrderRecord) -> Result<(), MailerError> {
        info!(
            order_uuid = %order.uuid,
            to = %order.customer.email,
            total = %display_total(order),
            items = order.items.len(),
            "order confirmation email"
        );

        Ok(())
    }

    async fn send_admin_notification(&self, order: &OrderRecord) -> Result<(), MailerError> {
        info!(
            order_uuid = %order.uuid,
            customer = %order.customer.name,
            total = %display_total(order),
            "new paid order notification"
        );

        Ok(())
    }
}
