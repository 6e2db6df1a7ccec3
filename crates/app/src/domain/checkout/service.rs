//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use gallery::{
    checkout::CheckoutForm,
    orders::{OrderLine, OrderStatus, VariantStatus},
    payments::{PaymentEvent, WebhookEvent},
};
use mockall::automock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        checkout::{
            data::{CapturedOrder, CreatedCheckout, WebhookNotification, WebhookOutcome},
            errors::CheckoutError,
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::NewOrder,
            records::{OrderRecord, OrderUuid},
        },
        settings::SettingsService,
        variants::{
            VariantsService,
            records::{VariantRecord, VariantUuid},
        },
    },
    mailer::Mailer,
    paypal::{PaymentGateway, PaymentRequest},
};

#[derive(Clone)]
pub struct DefaultCheckoutService {
    variants: Arc<dyn VariantsService>,
    orders: Arc<dyn OrdersService>,
    settings: Arc<dyn SettingsService>,
    gateway: Arc<dyn PaymentGateway>,
    mailer: Arc<dyn Mailer>,
}

impl DefaultCheckoutService {
    #[must_use]
    pub fn new(
        variants: Arc<dyn VariantsService>,
        orders: Arc<dyn OrdersService>,
        settings: Arc<dyn SettingsService>,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            variants,
            orders,
            settings,
            gateway,
            mailer,
        }
    }

    /// Price each requested line from the current catalog.
    async fn price_lines(&self, form: &CheckoutForm) -> Result<Vec<OrderLine>, CheckoutError> {
        let ids = form
            .items
            .iter()
            .map(|line| VariantUuid::from_uuid(line.variant_id))
            .collect();

        let variants: FxHashMap<VariantUuid, VariantRecord> = self
            .variants
            .get_variants(ids)
            .await?
            .into_iter()
            .map(|variant| (variant.uuid, variant))
            .collect();

        form.items
            .iter()
            .map(|line| {
                let variant = variants
                    .get(&VariantUuid::from_uuid(line.variant_id))
                    .filter(|variant| variant.status != VariantStatus::Discontinued)
                    .ok_or(CheckoutError::ProductsUnavailable)?;

                if !variant.can_fulfil(line.quantity) {
                    return Err(CheckoutError::InsufficientStock {
                        title: variant.title.clone(),
                    });
                }

                Ok(OrderLine::new(
                    line.variant_id,
                    variant.title.clone(),
                    variant.price,
                    line.quantity,
                ))
            })
            .collect()
    }

    /// Send the paid-order emails. Failures are logged and never undo the
    /// payment.
    async fn notify_paid(&self, order: &OrderRecord) {
        if let Err(error) = self.mailer.send_order_confirmation(order).await {
            warn!(order_uuid = %order.uuid, error = %error, "failed to send order confirmation");
        }

        if let Err(error) = self.mailer.send_admin_notification(order).await {
            warn!(order_uuid = %order.uuid, error = %error, "failed to send admin notification");
        }
    }
}

#[async_trait]
impl CheckoutService for DefaultCheckoutService {
    #[tracing::instrument(name = "checkout.create_order", skip_all, fields(order_uuid), err)]
    async fn create_order(&self, form: CheckoutForm) -> Result<CreatedCheckout, CheckoutError> {
        form.validate().map_err(CheckoutError::InvalidForm)?;

        let lines = self.price_lines(&form).await?;
        let shipping = self.settings.get_shipping().await?;
        let totals = shipping.totals_for(&lines);

        let order_uuid = OrderUuid::new();

        tracing::Span::current().record("order_uuid", tracing::field::display(order_uuid));

        let provider_order = self
            .gateway
            .create_order(PaymentRequest {
                reference_id: order_uuid,
                customer: form.customer.clone(),
                shipping_address: form.shipping_address.clone(),
                lines: lines.clone(),
                totals,
            })
            .await?;

        let order = self
            .orders
            .create_order(NewOrder {
                uuid: order_uuid,
                customer: form.customer,
                shipping_address: form.shipping_address,
                totals,
                paypal_order_id: provider_order.id,
                items: lines,
            })
            .await?;

        info!(
            paypal_order_id = %order.paypal_order_id,
            total = totals.total,
            "checkout order created"
        );

        Ok(CreatedCheckout {
            order_uuid: order.uuid,
            paypal_order_id: order.paypal_order_id,
            totals: order.totals,
        })
    }

    #[tracing::instrument(name = "checkout.capture_order", skip(self), fields(order_uuid), err)]
    async fn capture_order(&self, paypal_order_id: String) -> Result<CapturedOrder, CheckoutError> {
        let order = self
            .orders
            .get_order_by_paypal_id(paypal_order_id.clone())
            .await?;

        tracing::Span::current().record("order_uuid", tracing::field::display(order.uuid));

        if order.status.is_paid() {
            info!(status = %order.status, "order already paid, skipping capture");

            return Ok(CapturedOrder {
                order,
                already_paid: true,
            });
        }

        if order.status != OrderStatus::Pending {
            return Err(CheckoutError::NotPayable(order.status));
        }

        let capture = self
            .gateway
            .capture_order(paypal_order_id.clone(), order.uuid.to_string())
            .await?;

        if !capture.status.is_completed() {
            warn!(status = ?capture.status, "capture did not complete, order left pending");

            return Err(CheckoutError::PaymentNotCompleted(capture.status));
        }

        if let Some(captured) = capture.amount
            && captured != order.totals.total
        {
            warn!(
                expected = order.totals.total,
                captured, "captured amount differs from order total"
            );
        }

        let change = self
            .orders
            .mark_paid(paypal_order_id, capture.capture_id)
            .await?;

        if change.changed {
            self.notify_paid(&change.order).await;
        }

        Ok(CapturedOrder {
            already_paid: !change.changed,
            order: change.order,
        })
    }

    #[tracing::instrument(name = "checkout.handle_webhook", skip_all, fields(event_type), err)]
    async fn handle_webhook(
        &self,
        notification: WebhookNotification,
    ) -> Result<WebhookOutcome, CheckoutError> {
        let payload: Value =
            serde_json::from_str(&notification.body).map_err(CheckoutError::InvalidPayload)?;

        let event: WebhookEvent =
            serde_json::from_value(payload.clone()).map_err(CheckoutError::InvalidPayload)?;

        tracing::Span::current().record("event_type", event.event_type.as_str());

        if !self
            .gateway
            .verify_webhook(notification.headers, payload)
            .await?
        {
            warn!(event_id = %event.id, "webhook signature rejected");

            return Err(CheckoutError::InvalidSignature);
        }

        match event.classify() {
            PaymentEvent::Approved { paypal_order_id } => {
                info!(%paypal_order_id, "order approved, awaiting capture");

                Ok(WebhookOutcome::Approved { paypal_order_id })
            }
            PaymentEvent::CaptureCompleted {
                paypal_order_id,
                capture_id,
            } => match self.orders.mark_paid(paypal_order_id.clone(), capture_id).await {
                Ok(change) if change.order.status != OrderStatus::Paid => {
                    warn!(
                        order_uuid = %change.order.uuid,
                        status = %change.order.status,
                        "capture completed for an order that is no longer payable"
                    );

                    Ok(WebhookOutcome::NotPayable {
                        order_uuid: change.order.uuid,
                        status: change.order.status,
                    })
                }
                Ok(change) => {
                    if change.changed {
                        self.notify_paid(&change.order).await;
                    }

                    Ok(WebhookOutcome::Paid {
                        order_uuid: change.order.uuid,
                        changed: change.changed,
                    })
                }
                Err(OrdersServiceError::NotFound) => {
                    warn!(%paypal_order_id, "capture completed for unknown order");

                    Ok(WebhookOutcome::UnknownOrder { paypal_order_id })
                }
                Err(error) => Err(error.into()),
            },
            PaymentEvent::CaptureDenied { paypal_order_id } => {
                match self.orders.cancel_pending(paypal_order_id.clone()).await {
                    Ok(change) => {
                        info!(
                            order_uuid = %change.order.uuid,
                            changed = change.changed,
                            "capture denied"
                        );

                        Ok(WebhookOutcome::Cancelled {
                            order_uuid: change.order.uuid,
                            changed: change.changed,
                        })
                    }
                    Err(OrdersServiceError::NotFound) => {
                        warn!(%paypal_order_id, "capture denied for unknown order");

                        Ok(WebhookOutcome::UnknownOrder { paypal_order_id })
                    }
                    Err(error) => Err(error.into()),
                }
            }
            PaymentEvent::Ignored { event_type } => {
                debug!(%event_type, "ignoring webhook event");

                Ok(WebhookOutcome::Ignored { event_type })
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Validate and price a checkout form, create the PayPal order and store
    /// the local order as `PENDING`.
    async fn create_order(&self, form: CheckoutForm) -> Result<CreatedCheckout, CheckoutError>;

    /// Capture an approved PayPal order and mark the local order paid.
    /// Replays for an already paid order return it unchanged.
    async fn capture_order(&self, paypal_order_id: String) -> Result<CapturedOrder, CheckoutError>;

    /// Verify and apply a PayPal webhook notification.
    async fn handle_webhook(
        &self,
        notification: WebhookNotification,
    ) -> Result<WebhookOutcome, CheckoutError>;
}
