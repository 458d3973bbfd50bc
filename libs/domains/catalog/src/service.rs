//! Catalog service - business logic layer.
//!
//! Validation and store orchestration only; the service is version-agnostic.
//! Which operations a version exposes, and whether a flag gates them, is the
//! HTTP layer's concern.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, ProductPatch};
use crate::repository::ProductRepository;

pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product with a fresh id and zeroed counters.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        require_non_negative("price", Some(input.price))?;
        require_non_negative("discountedPrice", input.discounted_price)?;

        let product = Product::new(input);
        let created = self.repository.create(product).await?;

        tracing::info!(product_id = %created.id, "Created product");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Partial update: only patch-supplied fields overwrite the record.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<Product> {
        patch
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        require_non_negative("price", patch.price)?;
        require_non_negative("discountedPrice", patch.discounted_price)?;

        let mut product = self.get_product(id).await?;
        product.apply_patch(patch);

        let updated = self.repository.update(product).await?;
        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    /// Increment the view counter by exactly 1.
    ///
    /// Read-modify-write against the store; concurrent writers race with
    /// last-write-wins, same as every other write here.
    #[instrument(skip(self))]
    pub async fn record_view(&self, id: Uuid) -> CatalogResult<()> {
        let mut product = self.get_product(id).await?;
        product.views += 1;
        self.repository.update(product).await?;
        Ok(())
    }
}

impl<R: ProductRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn require_non_negative(field: &str, value: Option<Decimal>) -> CatalogResult<()> {
    match value {
        Some(amount) if amount < Decimal::ZERO => Err(CatalogError::Validation(format!(
            "{} must not be negative",
            field
        ))),
        _ => Ok(()),
    }
}
