use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, UpdateCategory},
    repository::CategoryRepository,
};

pub struct PgCategoryRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, category: Category) -> CategoryResult<Category> {
        let active_model: entity::ActiveModel = category.into();

        let model = self
            .base
            .insert(active_model)
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: &str) -> CategoryResult<Option<Category>> {
        let model = self
            .base
            .find_by_id(id.to_string())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_by_label(&self, label: &str) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Label.eq(label))
            .one(self.base.db())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_by_parent<'a>(&self, parent_id: Option<&'a str>) -> CategoryResult<Vec<Category>> {
        let query = match parent_id {
            Some(parent_id) => {
                entity::Entity::find().filter(entity::Column::ParentId.eq(parent_id))
            }
            None => entity::Entity::find().filter(entity::Column::ParentId.is_null()),
        };

        let models = query
            .all(self.base.db())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: &str, input: UpdateCategory) -> CategoryResult<Option<Category>> {
        let Some(model) = self
            .base
            .find_by_id(id.to_string())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?
        else {
            return Ok(None);
        };

        let active_model = entity::ActiveModel {
            id: Set(model.id),
            parent_id: Set(input.parent_id),
            label: Set(input.label),
        };

        let updated_model = self
            .base
            .update(active_model)
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(Some(updated_model.into()))
    }

    async fn delete(&self, id: &str) -> CategoryResult<bool> {
        let rows_affected = self
            .base
            .delete_by_id(id.to_string())
            .await
            .map_err(|e| CategoryError::Internal(format!("Database error: {}", e)))?;

        if rows_affected > 0 {
            tracing::info!(category_id = %id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
