//! Background cart re-validation.
//!
//! Re-checks the cart when the poller starts, whenever the cart changes, and
//! on a fixed interval while it holds items. Results are published on a watch
//! channel; the task stops when the poller is dropped.

use std::{sync::Arc, time::Duration};

use gallery::{cart::CartState, totals::ShippingSettings, validation::CartValidation};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::warn;

use crate::domain::cart_validation::{CartValidationRequest, CartValidationService};

/// How often a non-empty cart is re-validated.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct ValidationPoller {
    handle: JoinHandle<()>,
    results: watch::Receiver<Option<CartValidation>>,
}

impl ValidationPoller {
    /// Start polling `cart` on the current runtime.
    pub fn spawn(
        service: Arc<dyn CartValidationService>,
        cart: watch::Receiver<CartState>,
        period: Duration,
    ) -> Self {
        let (sender, results) = watch::channel(None);
        let handle = tokio::spawn(run(service, cart, sender, period));

        Self { handle, results }
    }

    /// Latest validation; `None` until the first one completes or while the
    /// cart is empty.
    #[must_use]
    pub fn results(&self) -> watch::Receiver<Option<CartValidation>> {
        self.results.clone()
    }
}

impl Drop for ValidationPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    service: Arc<dyn CartValidationService>,
    mut cart: watch::Receiver<CartState>,
    sender: watch::Sender<Option<CartValidation>>,
    period: Duration,
) {
    let mut interval = time::interval(period);
    let mut known_shipping: Option<ShippingSettings> = None;

    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            changed = cart.changed() => {
                if changed.is_err() {
                    break;
                }

                interval.reset();
            }
        }

        let items = cart.borrow_and_update().items().to_vec();

        if items.is_empty() {
            sender.send_replace(None);
            continue;
        }

        let request = CartValidationRequest {
            items,
            known_shipping,
        };

        match service.validate_cart(request).await {
            Ok(validation) => {
                known_shipping = Some(validation.shipping);
                sender.send_replace(Some(validation));
            }
            Err(error) => warn!(error = %error, "cart validation failed"),
        }
    }
}
