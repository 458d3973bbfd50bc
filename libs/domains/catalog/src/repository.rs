use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Product;

/// Repository trait for Product persistence.
///
/// The store is a keyed record table: exactly one record per id, full-record
/// writes, no optimistic concurrency (concurrent writers race with
/// last-write-wins).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, product: Product) -> CatalogResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List all products in insertion order
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    /// Replace an existing product record
    async fn update(&self, product: Product) -> CatalogResult<Product>;

    /// Delete a product by ID; false when it was not present
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Count stored products
    async fn count(&self) -> CatalogResult<usize>;
}

#[derive(Debug, Default)]
struct ProductTable {
    rows: HashMap<Uuid, Product>,
    /// Insertion order, so listings are stable across calls
    order: Vec<Uuid>,
}

/// In-memory implementation of ProductRepository.
///
/// Each operation takes the lock exactly once, so every read observes one
/// consistent snapshot of a record — a projection never sees a half-applied
/// write.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> CatalogResult<Product> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(&product.id) {
            return Err(CatalogError::Store(format!(
                "duplicate product id {}",
                product.id
            )));
        }

        table.order.push(product.id);
        table.rows.insert(product.id, product.clone());

        tracing::debug!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let table = self.table.read().await;
        let products = table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id))
            .cloned()
            .collect();
        Ok(products)
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&product.id) {
            return Err(CatalogError::NotFound(product.id));
        }

        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut table = self.table.write().await;

        let removed = table.rows.remove(&id).is_some();
        if removed {
            table.order.retain(|existing| *existing != id);
            tracing::debug!(product_id = %id, "Deleted product");
        }

        Ok(removed)
    }

    async fn count(&self) -> CatalogResult<usize> {
        let table = self.table.read().await;
        Ok(table.rows.len())
    }
}
