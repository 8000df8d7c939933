use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CategoryResult;
use crate::models::{Category, UpdateCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a fully-formed category record
    async fn insert(&self, category: Category) -> CategoryResult<Category>;

    /// Get a category by ID
    async fn find_by_id(&self, id: &str) -> CategoryResult<Option<Category>>;

    /// Find a category by its exact label
    async fn find_by_label(&self, label: &str) -> CategoryResult<Option<Category>>;

    /// List the direct children of a parent, or the roots when `None`
    async fn list_by_parent<'a>(&self, parent_id: Option<&'a str>) -> CategoryResult<Vec<Category>>;

    /// Replace the mutable fields of a category, `None` when the id is unknown
    async fn update(&self, id: &str, input: UpdateCategory) -> CategoryResult<Option<Category>>;

    /// Delete a category by ID, `false` when the id is unknown.
    ///
    /// Children and referencing products are left in place.
    async fn delete(&self, id: &str) -> CategoryResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;
        categories.push(category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn find_by_id(&self, id: &str) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_label(&self, label: &str) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.label == label).cloned())
    }

    async fn list_by_parent<'a>(&self, parent_id: Option<&'a str>) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .iter()
            .filter(|c| c.parent_id.as_deref() == parent_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, input: UpdateCategory) -> CategoryResult<Option<Category>> {
        let mut categories = self.categories.write().await;

        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        category.parent_id = input.parent_id;
        category.label = input.label;
        let updated = category.clone();

        tracing::info!(category_id = %id, "Updated category");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> CategoryResult<bool> {
        let mut categories = self.categories.write().await;

        let before = categories.len();
        categories.retain(|c| c.id != id);

        if categories.len() < before {
            tracing::info!(category_id = %id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, parent_id: Option<&str>, label: &str) -> Category {
        Category {
            id: id.to_string(),
            parent_id: parent_id.map(str::to_string),
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_category() {
        let repo = InMemoryCategoryRepository::new();

        repo.insert(category("c1", None, "Hardware")).await.unwrap();

        let fetched = repo.find_by_id("c1").await.unwrap();
        assert_eq!(fetched.unwrap().label, "Hardware");
    }

    #[tokio::test]
    async fn test_find_by_label_is_case_sensitive() {
        let repo = InMemoryCategoryRepository::new();

        repo.insert(category("c1", None, "Hardware")).await.unwrap();

        assert!(repo.find_by_label("Hardware").await.unwrap().is_some());
        assert!(repo.find_by_label("hardware").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_parent_splits_roots_and_children() {
        let repo = InMemoryCategoryRepository::new();

        repo.insert(category("r1", None, "Root 1")).await.unwrap();
        repo.insert(category("r2", None, "Root 2")).await.unwrap();
        repo.insert(category("c1", Some("r1"), "Child")).await.unwrap();

        let roots = repo.list_by_parent(None).await.unwrap();
        assert_eq!(
            roots.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["r1", "r2"]
        );

        let children = repo.list_by_parent(Some("r1")).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, "c1");
    }

    #[tokio::test]
    async fn test_delete_leaves_children_in_place() {
        let repo = InMemoryCategoryRepository::new();

        repo.insert(category("r1", None, "Root")).await.unwrap();
        repo.insert(category("c1", Some("r1"), "Child")).await.unwrap();

        assert!(repo.delete("r1").await.unwrap());

        // Orphaned child still exists and still points at the deleted parent
        let orphan = repo.find_by_id("c1").await.unwrap().unwrap();
        assert_eq!(orphan.parent_id.as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repo = InMemoryCategoryRepository::new();

        let result = repo
            .update(
                "missing",
                UpdateCategory {
                    label: "x".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
