use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products
    pub async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Create a new product with a generated ID.
    ///
    /// The referenced category is not checked for existence.
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = Product::new(shortid::generate(), input);
        self.repository.insert(product).await
    }

    /// Update a product, replacing its label and category reference
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Delete a product
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }

    /// Count the products attributed to a category node.
    ///
    /// The aggregation is shallow: products directly on the category, plus
    /// products directly on its parent when one is given. Deeper descendants
    /// are not summed.
    pub async fn count_products_for_category(
        &self,
        category_id: &str,
        parent_category_id: Option<&str>,
    ) -> ProductResult<u64> {
        let mut count = self.repository.count_by_category(category_id).await?;

        if let Some(parent_id) = parent_category_id {
            count += self.repository.count_by_category(parent_id).await?;
        }

        Ok(count)
    }
}
