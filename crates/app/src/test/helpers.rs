//! Record fixtures.

use gallery::{
    cart::CartItem,
    checkout::{CheckoutForm, CheckoutLine, Customer, ShippingAddress},
    orders::{OrderLine, OrderStatus, VariantStatus},
    totals::ShippingSettings,
};
use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::{
    orders::{
        data::NewOrder,
        records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
    },
    variants::{
        data::NewVariant,
        records::{VariantRecord, VariantUuid},
    },
};

pub(crate) fn sample_customer() -> (Customer, ShippingAddress) {
    (
        Customer {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        },
        ShippingAddress {
            line1: "Calle Mayor 1".to_string(),
            line2: None,
            city: "Madrid".to_string(),
            postal_code: "28013".to_string(),
            country: "ES".to_string(),
        },
    )
}

pub(crate) fn checkout_form(items: Vec<CheckoutLine>) -> CheckoutForm {
    let (customer, shipping_address) = sample_customer();

    CheckoutForm {
        customer,
        shipping_address,
        items,
    }
}

pub(crate) fn new_variant(title: &str, price: u64, stock: u32) -> NewVariant {
    NewVariant {
        uuid: VariantUuid::new(),
        product_uuid: Uuid::now_v7(),
        title: title.to_string(),
        slug: format!("{}-{}", title.to_lowercase().replace([' ', ','], "-"), Uuid::now_v7()),
        price,
        stock,
        status: VariantStatus::Available,
        image_url: None,
    }
}

pub(crate) fn variant_record(title: &str, price: u64, stock: u32) -> VariantRecord {
    let variant = new_variant(title, price, stock);
    let now = Timestamp::now();

    VariantRecord {
        uuid: variant.uuid,
        product_uuid: variant.product_uuid,
        title: variant.title,
        slug: variant.slug,
        price,
        stock,
        status: variant.status,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn cart_item(variant: &VariantRecord, price: u64, quantity: u32) -> CartItem {
    CartItem {
        variant_id: variant.uuid.into_uuid(),
        product_id: variant.product_uuid,
        title: variant.title.clone(),
        price,
        quantity,
        image_url: None,
        slug: variant.slug.clone(),
        stock: Some(variant.stock),
    }
}

pub(crate) fn new_order(paypal_order_id: &str, lines: &[(&VariantRecord, u32)]) -> NewOrder {
    let (customer, shipping_address) = sample_customer();

    let items: Vec<OrderLine> = lines
        .iter()
        .map(|(variant, quantity)| {
            OrderLine::new(
                variant.uuid.into_uuid(),
                variant.title.clone(),
                variant.price,
                *quantity,
            )
        })
        .collect();

    NewOrder {
        uuid: OrderUuid::new(),
        customer,
        shipping_address,
        totals: ShippingSettings::default().totals_for(&items),
        paypal_order_id: paypal_order_id.to_string(),
        items,
    }
}

/// An in-memory order with one line of two 10.00 prints.
pub(crate) fn order_record(paypal_order_id: &str, status: OrderStatus) -> OrderRecord {
    let variant = variant_record("Blue Hour, A3", 1_000, 5);
    let order = new_order(paypal_order_id, &[(&variant, 2)]);
    let now = Timestamp::now();

    let items = order
        .items
        .iter()
        .map(|line| OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: order.uuid,
            variant_uuid: VariantUuid::from_uuid(line.variant_id),
            title: line.title.clone(),
            quantity: line.quantity,
            price: line.price,
            total: line.total,
        })
        .collect();

    OrderRecord {
        uuid: order.uuid,
        status,
        customer: order.customer,
        shipping_address: order.shipping_address,
        totals: order.totals,
        paypal_order_id: order.paypal_order_id,
        paypal_capture_id: None,
        items,
        paid_at: status.is_paid().then_some(now),
        created_at: now,
        updated_at: now,
    }
}
