//! Persisted cart.

use tracing::warn;

use super::{CartAction, CartItem, CartState, CartStorage, STORAGE_KEY, StorageError};

/// A cart that rehydrates once from storage and writes its items back after
/// every dispatched action.
#[derive(Debug)]
pub struct PersistedCart<S> {
    state: CartState,
    storage: S,
    key: String,
}

impl<S: CartStorage> PersistedCart<S> {
    /// Rehydrate the cart stored under [`STORAGE_KEY`].
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, STORAGE_KEY)
    }

    /// Rehydrate the cart stored under a custom key.
    ///
    /// Unreadable or corrupt data yields an empty cart.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = rehydrate(&storage, &key);

        Self {
            state: CartState::new().reduce(CartAction::Hydrate(items)),
            storage,
            key,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply an action and persist the resulting items.
    ///
    /// The transition is applied even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error when the items cannot be written to storage.
    pub fn dispatch(&mut self, action: CartAction) -> Result<&CartState, StorageError> {
        let state = std::mem::take(&mut self.state);

        self.state = state.reduce(action);

        let serialized = serde_json::to_string(self.state.items())?;

        self.storage.save(&self.key, &serialized)?;

        Ok(&self.state)
    }
}

fn rehydrate<S: CartStorage>(storage: &S, key: &str) -> Vec<CartItem> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            warn!(key, "failed to read persisted cart: {error}");

            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|error| {
        warn!(key, "discarding corrupt persisted cart: {error}");

        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cart::{FileStorage, MemoryStorage, tests::item};

    use super::*;

    #[test]
    fn dispatch_persists_items() -> TestResult {
        let line = item(2_000, 1, None);
        let mut cart = PersistedCart::load(MemoryStorage::new());

        cart.dispatch(CartAction::AddItem(line.clone()))?;

        let stored = cart.storage().load(STORAGE_KEY)?.unwrap_or_default();
        let items: Vec<CartItem> = serde_json::from_str(&stored)?;

        assert_eq!(items, vec![line]);

        Ok(())
    }

    #[test]
    fn load_rehydrates_previous_items() -> TestResult {
        let dir = tempfile::tempdir()?;
        let line = item(2_000, 2, Some(5));

        let mut first = PersistedCart::load(FileStorage::new(dir.path()));
        first.dispatch(CartAction::AddItem(line.clone()))?;

        let second = PersistedCart::load(FileStorage::new(dir.path()));

        assert_eq!(second.state().items(), &[line]);
        assert_eq!(second.state().total(), 4_000);

        Ok(())
    }

    #[test]
    fn corrupt_storage_yields_empty_cart() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.save(STORAGE_KEY, "{not json")?;

        let cart = PersistedCart::load(storage);

        assert!(cart.state().is_empty());

        Ok(())
    }

    #[test]
    fn every_dispatch_after_load_is_written() -> TestResult {
        let line = item(2_000, 1, None);
        let mut storage = MemoryStorage::new();
        storage.save(STORAGE_KEY, &serde_json::to_string(&[line.clone()])?)?;

        let mut cart = PersistedCart::load(storage);
        cart.dispatch(CartAction::Toggle)?;

        let stored = cart.storage().load(STORAGE_KEY)?.unwrap_or_default();
        let items: Vec<CartItem> = serde_json::from_str(&stored)?;

        assert_eq!(items, vec![line]);
        assert!(cart.state().is_open());

        cart.dispatch(CartAction::RemoveItem(items[0].variant_id))?;

        assert_eq!(cart.storage().load(STORAGE_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn clear_persists_empty_array() -> TestResult {
        let mut cart = PersistedCart::load(MemoryStorage::new());

        cart.dispatch(CartAction::AddItem(item(100, 1, None)))?;
        cart.dispatch(CartAction::Clear)?;

        assert_eq!(cart.storage().load(STORAGE_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }
}
