//! Cart invariants across long sequences of actions.
//!
//! Whatever sequence of transitions is applied, the derived item count and
//! total must always agree with the lines in the cart.

use testresult::TestResult;
use uuid::Uuid;

use gallery::prelude::*;

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn catalog() -> Vec<CartItem> {
    (0..5_u32)
        .map(|n| CartItem {
            variant_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            title: format!("Print #{n}"),
            price: 1_000 + u64::from(n) * 250,
            quantity: 1,
            image_url: None,
            slug: format!("print-{n}"),
            stock: (n % 2 == 0).then_some(n + 2),
        })
        .collect()
}

fn random_action(rng: &mut Lcg, catalog: &[CartItem]) -> Option<CartAction> {
    let len = u64::try_from(catalog.len()).ok()?;
    let pick = usize::try_from(rng.below(len)).ok()?;
    let item = catalog.get(pick)?.clone();

    let action = match rng.below(6) {
        0 | 1 => CartAction::AddItem(CartItem {
            quantity: u32::try_from(rng.below(3)).ok()? + 1,
            ..item
        }),
        2 => CartAction::RemoveItem(item.variant_id),
        3 => CartAction::UpdateQuantity {
            variant_id: item.variant_id,
            quantity: i64::try_from(rng.below(8)).ok()? - 2,
        },
        4 => CartAction::Toggle,
        _ => CartAction::Clear,
    };

    Some(action)
}

#[test]
fn derived_totals_always_match_lines() -> TestResult {
    let catalog = catalog();
    let mut rng = Lcg(42);
    let mut state = CartState::new();

    for _ in 0..2_000 {
        let Some(action) = random_action(&mut rng, &catalog) else {
            continue;
        };

        state = state.reduce(action);

        let count: u64 = state.items().iter().map(|i| u64::from(i.quantity)).sum();
        let total: u64 = state
            .items()
            .iter()
            .map(|i| i.price * u64::from(i.quantity))
            .sum();

        assert_eq!(state.item_count(), count, "item count drifted");
        assert_eq!(state.total(), total, "total drifted");
        assert!(
            state
                .items()
                .iter()
                .all(|i| i.quantity > 0 && i.stock.is_none_or(|stock| i.quantity <= stock)),
            "lines must be positive and within stock"
        );
    }

    Ok(())
}

#[test]
fn persisted_cart_survives_reload_after_many_actions() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = catalog();
    let mut rng = Lcg(7);
    let mut cart = PersistedCart::load(FileStorage::new(dir.path()));

    for _ in 0..200 {
        if let Some(action) = random_action(&mut rng, &catalog) {
            cart.dispatch(action)?;
        }
    }

    let reloaded = PersistedCart::load(FileStorage::new(dir.path()));

    assert_eq!(reloaded.state().items(), cart.state().items());
    assert_eq!(reloaded.state().total(), cart.state().total());

    Ok(())
}
