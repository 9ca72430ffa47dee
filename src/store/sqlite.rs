//! SQLite Product Store
//! Mission: Durable product table on an embedded SQLite file
//!
//! ```sql
//! CREATE TABLE products (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     price REAL NOT NULL,
//!     imageUrl TEXT NOT NULL
//! );
//! ```
//!
//! `AUTOINCREMENT` keeps ids from being reused after the highest row is deleted.

use crate::{
    models::{NewProduct, Product},
    store::{ProductStore, StoreError},
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const PRODUCT_COLUMNS: &str = "id, name, description, price, imageUrl";

/// [`ProductStore`] backed by a single SQLite connection.
#[derive(Clone)]
pub struct SqliteProductStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "journal_mode", "WAL").ok();
        conn.pragma_update(None, "synchronous", "NORMAL").ok();
        Self::initialize_schema(&conn)?;

        info!("Product database ready at {}", path.as_ref().display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                imageUrl TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

fn row_to_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        image_url: row.get(4)?,
    })
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))?;
        let products = stmt
            .query_map([], row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"))?;
        let product = stmt.query_row(params![id], row_to_product).optional()?;
        product.ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO products (name, description, price, imageUrl)
             VALUES (?1, ?2, ?3, ?4)",
            params![fields.name, fields.description, fields.price, fields.image_url],
        )?;
        // Read under the same lock so no other insert can interleave
        let id = conn.last_insert_rowid();

        debug!(id, "Inserted product row");
        Ok(fields.with_id(id))
    }

    async fn update(&self, id: i64, fields: NewProduct) -> Result<Product, StoreError> {
        let conn = self.conn.lock().await;
        let rows_affected = conn.execute(
            "UPDATE products
             SET name = ?1, description = ?2, price = ?3, imageUrl = ?4
             WHERE id = ?5",
            params![
                fields.name,
                fields.description,
                fields.price,
                fields.image_url,
                id
            ],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(fields.with_id(id))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let rows_affected = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (SqliteProductStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = SqliteProductStore::open(temp_file.path()).unwrap();
        (store, temp_file)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (store, _temp) = create_test_store();
        contract::create_then_get_roundtrips(&store).await;
    }

    #[tokio::test]
    async fn test_ids_monotonic() {
        let (store, _temp) = create_test_store();
        contract::ids_start_at_one_and_increase(&store).await;
    }

    #[tokio::test]
    async fn test_missing_ids() {
        contract::missing_ids_are_not_found(&SqliteProductStore::in_memory().unwrap()).await;
    }

    #[tokio::test]
    async fn test_update_preserves_id() {
        contract::update_preserves_id(&SqliteProductStore::in_memory().unwrap()).await;
    }

    #[tokio::test]
    async fn test_delete_never_reuses_id() {
        let (store, _temp) = create_test_store();
        contract::delete_removes_and_never_reuses_id(&store).await;
    }

    #[tokio::test]
    async fn test_rows_survive_reopen() {
        let temp_file = NamedTempFile::new().unwrap();

        let created = {
            let store = SqliteProductStore::open(temp_file.path()).unwrap();
            store
                .create(contract::sample("Persisted", 12.0))
                .await
                .unwrap()
        };

        let reopened = SqliteProductStore::open(temp_file.path()).unwrap();
        assert_eq!(reopened.get_by_id(created.id).await.unwrap(), created);

        // Next id continues after the persisted one
        let next = reopened
            .create(contract::sample("Next", 1.0))
            .await
            .unwrap();
        assert_eq!(next.id, created.id + 1);
    }

    #[tokio::test]
    async fn test_engine_failure_is_not_not_found() {
        let store = SqliteProductStore::in_memory().unwrap();
        store
            .conn
            .lock()
            .await
            .execute("DROP TABLE products", [])
            .unwrap();

        let result = store.get_by_id(1).await;
        assert!(matches!(result, Err(StoreError::Sqlite(_))));
    }
}
