//! From a validated cart to order totals.

use testresult::TestResult;
use uuid::Uuid;

use gallery::prelude::*;

fn cart_item(price: u64, quantity: u32) -> CartItem {
    CartItem {
        variant_id: Uuid::now_v7(),
        product_id: Uuid::now_v7(),
        title: "Giclée print".to_string(),
        price,
        quantity,
        image_url: Some("https://cdn.example.com/print.jpg".to_string()),
        slug: "giclee-print".to_string(),
        stock: Some(10),
    }
}

#[test]
fn valid_cart_produces_consistent_order_totals() -> TestResult {
    let state = CartState::new()
        .reduce(CartAction::AddItem(cart_item(1_200, 1)))
        .reduce(CartAction::AddItem(cart_item(400, 2)));

    let variants: Vec<VariantSnapshot> = state
        .items()
        .iter()
        .map(|item| VariantSnapshot {
            id: item.variant_id,
            price: item.price,
            stock: 10,
            status: VariantStatus::Available,
        })
        .collect();

    let validation = validate_cart(state.items(), &variants, ShippingSettings::default(), None);

    assert!(validation.valid, "cart should be valid: {:?}", validation.issues);

    let lines: Vec<OrderLine> = state
        .items()
        .iter()
        .map(|item| OrderLine::new(item.variant_id, &item.title, item.price, item.quantity))
        .collect();

    let totals = validation.shipping.totals_for(&lines);
    let line_sum: u64 = lines.iter().map(|line| line.total).sum();

    assert_eq!(totals.subtotal, state.total());
    assert_eq!(totals.subtotal, 2_000);
    assert_eq!(totals.tax, 420);
    assert_eq!(totals.shipping, 500);
    assert_eq!(totals.total, 2_920);
    assert_eq!(line_sum + totals.tax + totals.shipping, totals.total);
    assert_eq!(format_amount(totals.total)?, "29.20");

    Ok(())
}

#[test]
fn tax_matches_rounded_rate_for_many_subtotals() {
    for subtotal in (0..10_000_u64).step_by(37) {
        let lines = [OrderLine::new(Uuid::nil(), "Print", subtotal, 1)];
        let totals = calculate_order_total(&lines, 500, 5_000);

        // round(subtotal * 0.21) in integer arithmetic, halves rounded up
        let expected_tax = (subtotal * 21 + 50) / 100;

        assert_eq!(totals.tax, expected_tax, "subtotal {subtotal}");
        assert_eq!(
            totals.shipping,
            if subtotal >= 5_000 { 0 } else { 500 },
            "subtotal {subtotal}"
        );
    }
}
