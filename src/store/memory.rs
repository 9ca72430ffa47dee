//! In-process product store for local development and tests.

use crate::{
    models::{NewProduct, Product},
    store::{ProductStore, StoreError},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::debug;

struct MemoryState {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

/// Map-backed [`ProductStore`]; contents are lost when the process exits.
pub struct MemoryProductStore {
    // id assignment and insertion happen under the same lock
    state: Mutex<MemoryState>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.state.lock().products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        self.state
            .lock()
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;

        let product = fields.with_id(id);
        state.products.insert(id, product.clone());
        debug!(id, "Inserted product into memory store");
        Ok(product)
    }

    async fn update(&self, id: i64, fields: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.state.lock();
        let slot = state
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = fields.with_id(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.state
            .lock()
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
