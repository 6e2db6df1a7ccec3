//! Test helpers.

use std::sync::Arc;

use gallery::{
    checkout::{Customer, ShippingAddress},
    orders::{OrderLine, OrderStatus},
    totals::ShippingSettings,
};
use jiff::Timestamp;
use salvo::{affix_state::inject, catcher::Catcher, prelude::*};
use uuid::Uuid;

use gallery_app::{
    context::AppContext,
    domain::{
        cart_validation::MockCartValidationService,
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        settings::MockSettingsService,
        variants::{MockVariantsService, records::VariantUuid},
    },
};

use crate::{
    admin,
    errors::json_errors,
    state::{AdminToken, State},
};

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Every service is a mock without expectations, so any call that a test did
/// not ask for fails it.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        variants: Arc::new(MockVariantsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        settings: Arc::new(MockSettingsService::new()),
        cart_validation: Arc::new(MockCartValidationService::new()),
        checkout: Arc::new(MockCheckoutService::new()),
    }
}

pub(crate) fn state_with(app: AppContext) -> Arc<State> {
    State::from_app_context(app, AdminToken::from_config(Some(TEST_ADMIN_TOKEN)))
}

pub(crate) fn service_with(app: AppContext, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with(app))).push(route))
        .catcher(Catcher::default().hoop(json_errors))
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service_with(
        AppContext {
            orders: Arc::new(orders),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn admin_orders_service(orders: MockOrdersService, route: Router) -> Service {
    orders_service(orders, Router::new().hoop(admin::middleware::handler).push(route))
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service_with(
        AppContext {
            checkout: Arc::new(checkout),
            ..strict_app()
        },
        route,
    )
}

pub(crate) fn cart_validation_service(
    cart_validation: MockCartValidationService,
    route: Router,
) -> Service {
    service_with(
        AppContext {
            cart_validation: Arc::new(cart_validation),
            ..strict_app()
        },
        route,
    )
}

/// An order for two 10.00 prints under the default shipping settings.
pub(crate) fn make_order(status: OrderStatus) -> OrderRecord {
    let uuid = OrderUuid::new();
    let line = OrderLine::new(Uuid::now_v7(), "Blue Hour, A3", 1_000, 2);
    let totals = ShippingSettings::default().totals_for(std::slice::from_ref(&line));

    OrderRecord {
        uuid,
        status,
        customer: Customer {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        },
        shipping_address: ShippingAddress {
            line1: "Calle Mayor 1".to_string(),
            line2: None,
            city: "Madrid".to_string(),
            postal_code: "28013".to_string(),
            country: "ES".to_string(),
        },
        totals,
        paypal_order_id: "PAYPAL-1".to_string(),
        paypal_capture_id: status.is_paid().then(|| "CAPTURE-1".to_string()),
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            variant_uuid: VariantUuid::from_uuid(line.variant_id),
            title: line.title,
            quantity: line.quantity,
            price: line.price,
            total: line.total,
        }],
        paid_at: status.is_paid().then_some(Timestamp::UNIX_EPOCH),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
