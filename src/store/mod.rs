//! Product Storage
//! Mission: One storage contract, two interchangeable backends
//!
//! Routes only ever see `Arc<dyn ProductStore>`; the backend is picked at
//! startup (see [`crate::config::StoreBackend`]).

pub mod memory;
pub mod sqlite;

pub use memory::MemoryProductStore;
pub use sqlite::SqliteProductStore;

use crate::models::{NewProduct, Product};
use async_trait::async_trait;

/// Errors produced by [`ProductStore`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    NotFound(i64),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// CRUD contract over the products table.
///
/// Ids are assigned by the store, increase monotonically, and are never
/// reused after a delete.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products in ascending id order.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError>;

    /// Persist a new product under a freshly assigned id.
    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError>;

    /// Replace all four fields of an existing product, keeping its id.
    async fn update(&self, id: i64, fields: NewProduct) -> Result<Product, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Short backend label for logs.
    fn backend_name(&self) -> &'static str;
}
