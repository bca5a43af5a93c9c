//! Catalog data-source trait and in-memory fixture implementation.
//!
//! The engines never own product records; they read through
//! `CatalogStore`, which is injected at construction so tests run against
//! fixture catalogs deterministically.

use crate::ids::{CategoryId, ProductId};
use crate::product::Product;
use async_trait::async_trait;
use std::sync::RwLock;
use thiserror::Error;

/// Errors from the catalog data source.
///
/// Store unavailability is the only failure the query layer propagates to
/// callers; an empty catalog is a valid state, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying data source could not be reached.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),

    /// The data source returned a malformed record.
    #[error("invalid record in catalog store: {0}")]
    InvalidRecord(String),
}

/// Read-only view over the product catalog.
///
/// Every predicate the query engine applies is expressible as a query
/// against an index, so implementations backed by a database can narrow
/// before returning rather than materializing the full catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All live products.
    async fn products(&self) -> Result<Vec<Product>, StoreError>;

    /// Look up a single product by id.
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Products in a category (sub-category matches count).
    async fn products_in_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self.products().await?;
        Ok(products
            .into_iter()
            .filter(|p| &p.category == category || p.sub_category.as_ref() == Some(category))
            .collect())
    }
}

/// In-memory catalog for tests, demos, and seed data.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a fixture set.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Insert a product.
    pub fn insert(&self, product: Product) {
        let mut products = self.products.write().unwrap_or_else(|e| e.into_inner());
        products.push(product);
    }

    /// Number of products held.
    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }
}

/// A store that always fails, for exercising the upstream-failure path.
#[derive(Debug, Default)]
pub struct UnavailableCatalog;

#[async_trait]
impl CatalogStore for UnavailableCatalog {
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn product(&self, _id: &ProductId) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[tokio::test]
    async fn test_memory_catalog_roundtrip() {
        let catalog = MemoryCatalog::new();
        let product = Product::new("Vitamin C Serum", "glow-lab", "skincare", Money::krw(68_000));
        let id = product.id.clone();
        catalog.insert(product);

        assert_eq!(catalog.len(), 1);
        let found = catalog.product(&id).await.unwrap();
        assert_eq!(found.unwrap().name, "Vitamin C Serum");
    }

    #[tokio::test]
    async fn test_category_lookup_includes_sub_category() {
        let mut serum = Product::new("Retinol Serum", "glow-lab", "skincare", Money::krw(85_000));
        serum.sub_category = Some(CategoryId::new("serum"));
        let catalog = MemoryCatalog::with_products(vec![serum]);

        let by_sub = catalog
            .products_in_category(&CategoryId::new("serum"))
            .await
            .unwrap();
        assert_eq!(by_sub.len(), 1);

        let by_main = catalog
            .products_in_category(&CategoryId::new("skincare"))
            .await
            .unwrap();
        assert_eq!(by_main.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = UnavailableCatalog;
        assert!(store.products().await.is_err());
    }
}
