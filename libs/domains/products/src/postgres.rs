use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Product, UpdateProduct},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let model = self
            .base
            .find_by_id(id.to_string())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .all(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count_by_category(&self, category_id: &str) -> ProductResult<u64> {
        entity::Entity::find()
            .filter(entity::Column::CategoryId.eq(category_id))
            .count(self.base.db())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))
    }

    async fn update(&self, id: &str, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let Some(model) = self
            .base
            .find_by_id(id.to_string())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?
        else {
            return Ok(None);
        };

        let active_model = entity::ActiveModel {
            id: Set(model.id),
            category_id: Set(input.category_id),
            label: Set(input.label),
        };

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(updated_model.into()))
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id.to_string())
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
