use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a fully-formed product record
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// List all products in insertion order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Count products directly assigned to a category
    async fn count_by_category(&self, category_id: &str) -> ProductResult<u64>;

    /// Replace the mutable fields of a product, `None` when the id is unknown
    async fn update(&self, id: &str, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product by ID, `false` when the id is unknown
    async fn delete(&self, id: &str) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.push(product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.clone())
    }

    async fn count_by_category(&self, category_id: &str) -> ProductResult<u64> {
        let products = self.products.read().await;
        let count = products
            .iter()
            .filter(|p| p.category_id.as_deref() == Some(category_id))
            .count();
        Ok(count as u64)
    }

    async fn update(&self, id: &str, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() < before {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
