//! Cart
//!
//! Client-side cart state. Every change goes through [`CartState::reduce`], a
//! pure transition over the previous state; persistence is layered on top by
//! [`PersistedCart`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod persisted;
mod storage;

pub use persisted::PersistedCart;
pub use storage::{CartStorage, FileStorage, MemoryStorage, STORAGE_KEY, StorageError};

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Purchasable variant.
    pub variant_id: Uuid,

    /// Product the variant belongs to.
    pub product_id: Uuid,

    /// Display title.
    pub title: String,

    /// Unit price in minor units, as last seen by the client.
    pub price: u64,

    /// Number of units.
    pub quantity: u32,

    /// Optional preview image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Product slug for linking back to the catalog.
    pub slug: String,

    /// Stock known when the item was added, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl CartItem {
    /// Line total in minor units.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Cart transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add an item, merging with an existing line for the same variant.
    AddItem(CartItem),

    /// Remove the line for a variant.
    RemoveItem(Uuid),

    /// Set the quantity of a line; zero or less removes it.
    UpdateQuantity {
        /// Line to update.
        variant_id: Uuid,
        /// Requested quantity.
        quantity: i64,
    },

    /// Empty the cart.
    Clear,

    /// Flip the drawer open state.
    Toggle,

    /// Set the drawer open state.
    SetOpen(bool),

    /// Replace the items with previously persisted ones.
    Hydrate(Vec<CartItem>),
}

/// Cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartItem>,
    is_open: bool,
}

impl CartState {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart drawer is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether there are no lines in the cart.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` across all lines, in minor units.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Look up the line for a variant.
    pub fn item(&self, variant_id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.variant_id == variant_id)
    }

    /// Apply an action, returning the next state.
    #[must_use]
    pub fn reduce(self, action: CartAction) -> Self {
        match action {
            CartAction::AddItem(item) => self.add_item(item),
            CartAction::RemoveItem(variant_id) => self.remove_item(variant_id),
            CartAction::UpdateQuantity {
                variant_id,
                quantity,
            } => self.update_quantity(variant_id, quantity),
            CartAction::Clear => Self {
                items: Vec::new(),
                ..self
            },
            CartAction::Toggle => Self {
                is_open: !self.is_open,
                ..self
            },
            CartAction::SetOpen(is_open) => Self { is_open, ..self },
            CartAction::Hydrate(items) => Self {
                items: items.into_iter().filter(|item| item.quantity > 0).collect(),
                ..self
            },
        }
    }

    fn add_item(mut self, item: CartItem) -> Self {
        if item.quantity == 0 {
            return self;
        }

        let position = self
            .items
            .iter()
            .position(|existing| existing.variant_id == item.variant_id);

        match position.and_then(|index| self.items.get_mut(index)) {
            Some(existing) => {
                let quantity = existing.quantity.saturating_add(item.quantity);

                if item.stock.or(existing.stock).is_some_and(|stock| quantity > stock) {
                    return self;
                }

                existing.quantity = quantity;
                existing.price = item.price;
                existing.title = item.title;
                existing.image_url = item.image_url.or(existing.image_url.take());
                existing.stock = item.stock.or(existing.stock);
            }
            None => {
                if item.stock.is_some_and(|stock| item.quantity > stock) {
                    return self;
                }

                self.items.push(item);
            }
        }

        self
    }

    fn remove_item(mut self, variant_id: Uuid) -> Self {
        self.items.retain(|item| item.variant_id != variant_id);

        self
    }

    fn update_quantity(mut self, variant_id: Uuid, quantity: i64) -> Self {
        if quantity <= 0 {
            return self.remove_item(variant_id);
        }

        let Some(stock) = self.item(variant_id).map(|item| item.stock) else {
            return self;
        };

        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        let clamped = stock.map_or(requested, |stock| requested.min(stock));

        if clamped == 0 {
            return self.remove_item(variant_id);
        }

        self.items
            .iter_mut()
            .filter(|item| item.variant_id == variant_id)
            .for_each(|item| item.quantity = clamped);

        self
    }
}
